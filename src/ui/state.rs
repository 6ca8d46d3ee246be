use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::audio::{AudioClip, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
use crate::common::{EducationAnswer, ServiceCommand, ServiceEvent, User, WasteItem};
use crate::geo::{GeolocationState, LocationProvider};
use crate::market::forms::ANONYMOUS_PROVIDER;
use crate::market::{
    ALL_CATEGORIES, ListingForm, RegistrationForm, categories, filter_listings, seed_listings,
};
use crate::storage::UserStore;

use super::chat_panel::ChatPanel;

pub const IMAGE_ERROR: &str = "Image analysis failed. Please enter details manually.";
pub const SEARCH_ERROR: &str = "Failed to search with AI. Please try again.";
pub const EDUCATION_ERROR: &str = "Failed to fetch educational content. Please try again.";
pub const AUDIO_ERROR: &str = "Sorry, could not play the audio.";
pub const EMPTY_SEARCH_TERM: &str = "Please enter a search term.";
pub const LOGIN_PLACEHOLDER: &str = "Login feature coming soon!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Search,
    PostWaste,
    Impact,
    About,
    Profile,
}

impl Page {
    /// Pages listed in the header, in display order.
    pub const NAV: [Page; 5] = [
        Page::Home,
        Page::PostWaste,
        Page::Search,
        Page::Impact,
        Page::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Search => "Search Waste",
            Page::PostWaste => "Post Waste",
            Page::Impact => "Impact",
            Page::About => "About",
            Page::Profile => "Profile",
        }
    }

    /// The page actually rendered: Profile needs a signed-in user.
    pub fn resolve(self, user: Option<&User>) -> Page {
        match (self, user) {
            (Page::Profile, None) => Page::Home,
            (page, _) => page,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub term: String,
    pub category: String,
    pub searching: bool,
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: String::new(),
            category: ALL_CATEGORIES.to_string(),
            searching: false,
            error: None,
        }
    }
}

/// Speech that has been synthesized for the current answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechClip {
    pub path: PathBuf,
    pub duration_secs: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactState {
    pub query: String,
    pub loading: bool,
    pub answer: Option<EducationAnswer>,
    pub error: Option<String>,
    pub speech_pending: bool,
    pub clip: Option<SpeechClip>,
    /// Bumped on every new or cancelled speech request.
    speech_generation: u64,
}

impl ImpactState {
    /// "Stop" while a clip is active or being fetched.
    pub fn speaking(&self) -> bool {
        self.speech_pending || self.clip.is_some()
    }

    /// Forget the clip and make any in-flight audio stale.
    fn cancel_speech(&mut self) {
        self.speech_pending = false;
        self.clip = None;
        self.speech_generation += 1;
    }
}

/// View-model for the whole app. Rendering reads it; user actions go through
/// its methods, which return the AI request to issue, if any.
pub struct AppState {
    page: Page,
    current_user: Option<User>,
    listings: Vec<WasteItem>,
    pub registration: RegistrationForm,
    pub post: ListingForm,
    pub search: SearchState,
    pub impact: ImpactState,
    pub assistant: Option<ChatPanel>,
    pub listing_chat: Option<ChatPanel>,
    pub geolocation: GeolocationState,
    /// Modal message, the desktop stand-in for `alert()`.
    pub notice: Option<String>,
    /// Set by "Get Started"/"Login"; the home page scrolls to the form once.
    pub focus_registration: bool,
    audio_dir: PathBuf,
    store: Box<dyn UserStore>,
    locator: Box<dyn LocationProvider>,
}

impl AppState {
    /// Restore the signed-in user, if any, and start on the home page.
    pub fn new(
        store: Box<dyn UserStore>,
        locator: Box<dyn LocationProvider>,
        audio_dir: PathBuf,
    ) -> Self {
        let current_user = match store.load_user() {
            Ok(user) => user,
            Err(err) => {
                log::warn!("Ignoring stored user: {err}");
                None
            }
        };

        Self {
            page: Page::Home,
            current_user,
            listings: seed_listings(),
            registration: RegistrationForm::default(),
            post: ListingForm::default(),
            search: SearchState::default(),
            impact: ImpactState::default(),
            assistant: None,
            listing_chat: None,
            geolocation: GeolocationState::default(),
            notice: None,
            focus_registration: false,
            audio_dir,
            store,
            locator,
        }
    }

    // ========== Navigation ==========

    pub fn page(&self) -> Page {
        self.page.resolve(self.current_user.as_ref())
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        if page == Page::Search {
            self.geolocation.request(self.locator.as_ref());
        }
    }

    // ========== Session ==========

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn login(&mut self, user: User) {
        if let Err(err) = self.store.save_user(&user) {
            log::error!("Failed to persist user: {err}");
        }
        log::info!("Signed in as {}", user.full_name);
        self.current_user = Some(user);
        self.navigate(Page::Profile);
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear_user() {
            log::error!("Failed to clear stored user: {err}");
        }
        self.current_user = None;
        self.navigate(Page::Home);
    }

    pub fn submit_registration(&mut self) {
        match self.registration.submit() {
            Ok(user) => {
                self.registration = RegistrationForm::default();
                self.login(user);
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    pub fn login_placeholder(&mut self) {
        self.notice = Some(LOGIN_PLACEHOLDER.to_string());
    }

    /// Show the registration form on the home page.
    pub fn start_registration(&mut self) {
        self.navigate(Page::Home);
        self.focus_registration = self.current_user.is_none();
    }

    // ========== Listings ==========

    /// New listings go first; the view moves to the search page.
    pub fn add_listing(&mut self, item: WasteItem) {
        log::info!("Listing posted: {}", item.title);
        self.listings.insert(0, item);
        self.navigate(Page::Search);
    }

    pub fn visible_listings(&self) -> Vec<&WasteItem> {
        filter_listings(&self.listings, &self.search.term, &self.search.category)
    }

    pub fn category_chips(&self) -> Vec<String> {
        categories(&self.listings)
    }

    /// Start classifying the photo typed into the post form.
    pub fn analyze_image(&mut self) -> Option<ServiceCommand> {
        let input = self.post.image_input.trim();
        if input.is_empty() || self.post.analyzing {
            return None;
        }
        let path = PathBuf::from(input);
        self.post.image_path = Some(path.clone());
        self.post.analyzing = true;
        self.post.error = None;
        Some(ServiceCommand::AnalyzeImage { path })
    }

    pub fn submit_listing(&mut self) {
        let provider = self
            .current_user
            .as_ref()
            .map(|user| user.full_name.clone())
            .unwrap_or_else(|| ANONYMOUS_PROVIDER.to_string());

        match self.post.submit(&provider, Utc::now()) {
            Ok(item) => {
                self.post = ListingForm::default();
                self.add_listing(item);
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    pub fn search_with_geo(&mut self) -> Option<ServiceCommand> {
        if self.search.term.trim().is_empty() {
            self.notice = Some(EMPTY_SEARCH_TERM.to_string());
            return None;
        }
        if self.search.searching {
            return None;
        }
        self.search.searching = true;
        self.search.error = None;
        Some(ServiceCommand::SearchNearby {
            query: self.search.term.clone(),
            location: self.geolocation.location,
        })
    }

    // ========== Impact ==========

    pub fn ask_question(&mut self) -> Option<ServiceCommand> {
        if self.impact.query.trim().is_empty() || self.impact.loading {
            return None;
        }
        self.impact.loading = true;
        self.impact.error = None;
        self.impact.answer = None;
        self.impact.cancel_speech();
        Some(ServiceCommand::AskEducation {
            query: self.impact.query.clone(),
        })
    }

    /// "Read Aloud" / "Stop".
    pub fn toggle_speech(&mut self) -> Option<ServiceCommand> {
        if self.impact.speaking() {
            self.impact.cancel_speech();
            return None;
        }
        let text = self.impact.answer.as_ref()?.text.clone();
        self.impact.speech_generation += 1;
        self.impact.speech_pending = true;
        Some(ServiceCommand::Speak {
            request: self.impact.speech_generation,
            text,
        })
    }

    // ========== Chat ==========

    pub fn toggle_assistant(&mut self) {
        self.assistant = match self.assistant.take() {
            Some(_) => None,
            None => Some(ChatPanel::assistant()),
        };
    }

    pub fn open_listing_chat(&mut self, listing_id: &str) {
        if let Some(item) = self.listings.iter().find(|item| item.id == listing_id) {
            self.listing_chat = Some(ChatPanel::for_listing(item));
        }
    }

    fn panel_mut(&mut self, id: Uuid) -> Option<&mut ChatPanel> {
        self.assistant
            .iter_mut()
            .chain(self.listing_chat.iter_mut())
            .find(|panel| panel.id() == id)
    }

    pub fn send_chat(&mut self, panel: Uuid) -> Option<ServiceCommand> {
        self.panel_mut(panel)?.send()
    }

    // ========== AI results ==========

    pub fn apply_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::ImageAnalyzed(result) => {
                self.post.analyzing = false;
                match result {
                    Ok(analysis) => self.post.apply_analysis(analysis),
                    Err(_) => self.post.error = Some(IMAGE_ERROR.to_string()),
                }
            }
            ServiceEvent::NearbyResults { query, result } => {
                self.search.searching = false;
                match result {
                    Ok(text) => {
                        self.notice = Some(format!(
                            "AI suggestion for \"{query}\" near your location:\n\n{text}"
                        ))
                    }
                    Err(_) => self.search.error = Some(SEARCH_ERROR.to_string()),
                }
            }
            ServiceEvent::EducationAnswered(result) => {
                self.impact.loading = false;
                match result {
                    Ok(answer) => self.impact.answer = Some(answer),
                    Err(_) => self.impact.error = Some(EDUCATION_ERROR.to_string()),
                }
            }
            ServiceEvent::SpeechReady { request, result } => {
                if !self.impact.speech_pending || request != self.impact.speech_generation {
                    log::debug!("Dropping stale speech for request {request}");
                    return;
                }
                self.impact.speech_pending = false;
                match result.and_then(|payload| self.store_speech(&payload)) {
                    Ok(clip) => self.impact.clip = Some(clip),
                    Err(_) => self.notice = Some(AUDIO_ERROR.to_string()),
                }
            }
            ServiceEvent::ChatReplied { panel, result } => match self.panel_mut(panel) {
                Some(chat) => chat.apply_reply(result),
                None => log::debug!("Dropping reply for closed chat panel {panel}"),
            },
        }
    }

    fn store_speech(&self, payload: &str) -> Result<SpeechClip, String> {
        let clip = AudioClip::from_base64_pcm(payload, SPEECH_SAMPLE_RATE, SPEECH_CHANNELS)
            .map_err(|err| {
                log::error!("Failed to decode speech audio: {err}");
                err.to_string()
            })?;
        let name = format!("answer-{}", Uuid::new_v4());
        let path = clip.save_wav(&self.audio_dir, &name).map_err(|err| {
            log::error!("Failed to write speech audio: {err}");
            err.to_string()
        })?;
        log::info!("Saved speech to {}", path.display());
        Ok(SpeechClip {
            path,
            duration_secs: clip.duration_secs(),
        })
    }
}
