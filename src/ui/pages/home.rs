use eframe::egui;

use crate::common::Role;
use crate::market::forms::{FIELD_TYPES, USER_CATEGORIES, WASTE_TYPES};
use crate::ui::state::AppState;

const STATS: [(&str, &str); 3] = [
    ("200+", "Waste saved"),
    ("50+", "Users connected"),
    ("10+", "collaborations"),
];

const STEPS: [(&str, &str); 3] = [
    (
        "Post Your Waste",
        "Providers list available bio-waste with details like type, quantity, and location. Our AI can even help categorize it from a photo!",
    ),
    (
        "Discover & Search",
        "Researchers and innovators search our database using advanced filters and geo-mapping to find the perfect resources for their projects.",
    ),
    (
        "Connect & Collaborate",
        "Use our secure platform to connect, chat, and arrange the logistics for turning waste into a valuable new product.",
    ),
];

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("Turning Bio-Waste into Bio-Wealth").size(32.0));
        ui.label("Connecting waste producers with biotech innovators.");
        if ui.button("Get Started").clicked() {
            state.start_registration();
        }
    });
    ui.add_space(16.0);

    ui.columns(STATS.len(), |columns| {
        for (column, (value, label)) in columns.iter_mut().zip(STATS) {
            column.vertical_centered(|ui| {
                ui.label(egui::RichText::new(value).strong().size(28.0));
                ui.label(label);
            });
        }
    });
    ui.add_space(16.0);

    ui.heading("How It Works");
    ui.columns(STEPS.len(), |columns| {
        for (column, (title, body)) in columns.iter_mut().zip(STEPS) {
            egui::Frame::group(column.style()).show(column, |ui| {
                ui.label(egui::RichText::new(title).strong());
                ui.label(body);
            });
        }
    });
    ui.add_space(16.0);

    if state.current_user().is_none() {
        registration(ui, state);
    }
}

fn registration(ui: &mut egui::Ui, state: &mut AppState) {
    let heading = ui.heading("Join Waste2Worth Today");
    if std::mem::take(&mut state.focus_registration) {
        heading.scroll_to_me(Some(egui::Align::TOP));
    }
    ui.label("Become part of the community turning waste into valuable resources. Create your account to get started.");
    ui.add_space(8.0);

    let form = &mut state.registration;
    ui.label(egui::RichText::new("Select Your Role").strong());
    ui.horizontal(|ui| {
        ui.radio_value(&mut form.role, Role::Provider, "Waste Provider (Industry/Lab/Farm)");
        ui.radio_value(&mut form.role, Role::Researcher, "Researcher/Innovator (Student/Startup)");
    });

    egui::Grid::new("registration_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            text_row(ui, "Full Name", &mut form.full_name);
            text_row(ui, "Organization", &mut form.organization);
            text_row(ui, "Email", &mut form.email);

            ui.label("Password");
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut form.password).password(!form.show_password));
                ui.checkbox(&mut form.show_password, "Show");
            });
            ui.end_row();

            text_row(ui, "Phone (optional)", &mut form.phone);
            text_row(ui, "Location", &mut form.location);
            choice_row(ui, "Field Type", FIELD_TYPES, &mut form.field_type);
            choice_row(ui, "User Category", USER_CATEGORIES, &mut form.user_category);
            if form.role == Role::Provider {
                choice_row(ui, "Waste Type (optional)", WASTE_TYPES, &mut form.waste_type);
            }
        });

    ui.add_space(8.0);
    if ui.button("Register").clicked() {
        state.submit_registration();
    }
    ui.horizontal(|ui| {
        ui.label("Already have an account?");
        if ui.link("Login").clicked() {
            state.login_placeholder();
        }
    });
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.text_edit_singleline(value);
    ui.end_row();
}

fn choice_row(ui: &mut egui::Ui, label: &str, options: &[&str], value: &mut String) {
    ui.label(label);
    let selected = if value.is_empty() {
        format!("{label}...")
    } else {
        value.clone()
    };
    egui::ComboBox::from_id_salt(label)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
    ui.end_row();
}
