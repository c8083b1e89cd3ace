use anyhow::Result;

use mars_core::AppConfig;
use mars_tui::themes::available_themes;

pub fn run(config: &AppConfig) -> Result<()> {
    println!("Available themes:");
    for name in available_themes() {
        let marker = if name.eq_ignore_ascii_case(&config.ui.theme.name) {
            " (current)"
        } else {
            ""
        };
        println!("  {}{}", name, marker);
    }
    Ok(())
}
