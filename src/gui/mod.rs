//! GUI module
//!
//! egui-based launcher window.

mod app;
mod i18n;

use anyhow::Result;
use browser_profile_launcher::Config;
use browser_profile_launcher::core::registry::ProfileRegistry;
use browser_profile_launcher::server;
use std::net::SocketAddr;

/// System fonts with Japanese glyphs, tried in order
const CJK_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
];

/// Run the GUI application
pub fn run(
    config: Config,
    registry: ProfileRegistry,
    icon_addr: SocketAddr,
    runtime: tokio::runtime::Handle,
) -> Result<()> {
    let window = config.window.clone();
    let icon_base = server::base_url(icon_addr)?;
    let app = app::LauncherApp::new(config, registry, icon_base, runtime)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_resizable(false)
            .with_title(&window.title),
        ..Default::default()
    };

    eframe::run_native(
        &window.title,
        options,
        Box::new(move |cc| {
            install_cjk_font(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}

/// Add the first available CJK system font as a fallback for every family
fn install_cjk_font(ctx: &egui::Context) {
    let Some((path, bytes)) = CJK_FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (path, bytes)))
    else {
        tracing::debug!("No CJK font found; Japanese labels may not render");
        return;
    };

    tracing::debug!("Using CJK font {}", path);
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_string(), egui::FontData::from_owned(bytes));
    for family in fonts.families.values_mut() {
        family.push("cjk".to_string());
    }
    ctx.set_fonts(fonts);
}
