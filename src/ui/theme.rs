use egui::{Color32, Context, Visuals};

pub fn apply_theme(ctx: &Context, dark: bool) {
    if dark {
        ctx.set_visuals(dark_visuals());
    } else {
        ctx.set_visuals(Visuals::light());
    }
}

// Palette carried over from the Qt builds.
fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.window_fill = Color32::from_rgb(53, 53, 53);
    visuals.panel_fill = Color32::from_rgb(53, 53, 53);
    visuals.extreme_bg_color = Color32::from_rgb(25, 25, 25);
    visuals.selection.bg_fill = Color32::from_rgb(42, 130, 218);
    visuals.hyperlink_color = Color32::from_rgb(42, 130, 218);
    visuals
}

/// Fill color for the data-partition gauge: green at 0%, yellow at 50%,
/// red at 100%, linear in between.
pub fn rom_usage_color(percent: u8) -> Color32 {
    let percent = percent.min(100) as u32;
    if percent <= 50 {
        Color32::from_rgb((255 * percent / 50) as u8, 255, 0)
    } else {
        Color32::from_rgb(255, (255 * (100 - percent) / 50) as u8, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rom_usage_color_hits_the_anchors() {
        assert_eq!(rom_usage_color(0), Color32::from_rgb(0, 255, 0));
        assert_eq!(rom_usage_color(50), Color32::from_rgb(255, 255, 0));
        assert_eq!(rom_usage_color(100), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn rom_usage_color_stays_on_the_green_red_ramp() {
        for percent in 0..=100u8 {
            let color = rom_usage_color(percent);
            assert_eq!(color.b(), 0);
            if percent <= 50 {
                assert_eq!(color.g(), 255);
            } else {
                assert_eq!(color.r(), 255);
            }
        }
        assert!(rom_usage_color(25).r() < rom_usage_color(40).r());
        assert!(rom_usage_color(80).g() < rom_usage_color(60).g());
    }

    #[test]
    fn rom_usage_color_clamps_above_100() {
        assert_eq!(rom_usage_color(255), rom_usage_color(100));
    }
}
