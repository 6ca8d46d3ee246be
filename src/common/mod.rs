pub mod commands;
pub mod events;
pub mod types;

pub use commands::ServiceCommand;
pub use events::ServiceEvent;
pub use types::{
    ChatMessage, Coordinates, EducationAnswer, GroundingSource, ImageAnalysis, ProviderSummary,
    Role, Sender, SourceLink, User, WasteItem,
};
