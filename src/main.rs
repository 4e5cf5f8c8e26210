mod app;
mod ui;

use clap::Parser;
use eframe::egui;

use app::ServiceApp;

/// Native viewer for prayer services
#[derive(Parser, Debug)]
#[command(name = "siddur-browser")]
#[command(version, about)]
struct Cli {
    /// Page URL (e.g. `https://host/service.html?service=shacharit`) or site directory
    #[arg(value_name = "LOCATION", env = "SIDDUR_SITE", default_value = ".")]
    location: String,

    /// Service to open, overriding the URL's `service` parameter
    #[arg(short, long)]
    service: Option<String>,
}

/// Fonts with Hebrew coverage, tried in order.
const HEBREW_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/culmus/TaameyFrankCLM-Medium.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn main() -> eframe::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Siddur Browser",
        options,
        Box::new(move |cc| {
            install_hebrew_font(&cc.egui_ctx);
            let mut app = ServiceApp::new(cli.location, cli.service);
            app.navigate(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}

fn install_hebrew_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    let Some(data) = HEBREW_FONT_PATHS.iter().find_map(|p| std::fs::read(p).ok()) else {
        log::warn!("No Hebrew-capable font found; lines may not display");
        return;
    };
    fonts
        .font_data
        .insert("hebrew".to_owned(), egui::FontData::from_owned(data));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(list) = fonts.families.get_mut(&family) {
            list.push("hebrew".to_owned());
        }
    }
    ctx.set_fonts(fonts);
}

impl eframe::App for ServiceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch(ctx);

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui);
        });
    }
}
