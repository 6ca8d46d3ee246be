use eframe::egui;

const SECTIONS: [(&str, &str); 4] = [
    (
        "Our Mission",
        "To build a global ecosystem where every piece of bio-waste is seen as a valuable resource, fostering innovation for a circular and sustainable economy.",
    ),
    (
        "Who We Are",
        "A team of environmental scientists, software engineers, and sustainability advocates building a digital bridge between waste streams and the people who can put them to use.",
    ),
    (
        "What We Do",
        "For Waste Providers, from local cafes to large agricultural operations, we offer a simple way to list byproducts, reducing disposal costs and creating new revenue. For Researchers and Innovators, we provide a searchable source of raw materials for bioplastics, biofuels, and new bioproducts.",
    ),
    (
        "Our Vision for the Future",
        "A future where landfills are obsolete and the concept of waste is redefined. Join us in turning today's waste into tomorrow's solutions.",
    ),
];

pub fn render(ui: &mut egui::Ui) {
    ui.heading("About Waste2Worth");
    ui.add_space(8.0);

    for (title, body) in SECTIONS {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().size(18.0));
            ui.label(body);
        });
        ui.add_space(8.0);
    }
}
