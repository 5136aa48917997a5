use eframe::egui;

fn rgba(r: u8, g: u8, b: u8, a: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlShape {
    Rounded,
    Circular,
}

/// Shape and material of the panel's controls, derived from what the host's
/// compositor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlStyle {
    pub shape: ControlShape,
    pub translucent: bool,
}

impl ControlStyle {
    pub fn for_compositor(translucent: bool) -> Self {
        Self {
            shape: if translucent {
                ControlShape::Circular
            } else {
                ControlShape::Rounded
            },
            translucent,
        }
    }

    pub fn rounding(&self, size: f32) -> egui::Rounding {
        match self.shape {
            ControlShape::Rounded => egui::Rounding::same(6.0),
            ControlShape::Circular => egui::Rounding::same(size / 2.0),
        }
    }
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self::for_compositor(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelTheme {
    pub name: &'static str,
    pub dark: bool,
    pub window_fill: egui::Color32,
    pub text: egui::Color32,
    pub control_fill: egui::Color32,
    pub control_hover: egui::Color32,
    pub control_active: egui::Color32,
    pub filler: egui::Color32,
}

impl PanelTheme {
    pub fn light() -> Self {
        Self {
            name: "light",
            dark: false,
            window_fill: rgba(243, 243, 243, 255),
            text: rgba(36, 36, 36, 255),
            control_fill: rgba(243, 243, 243, 255),
            control_hover: rgba(230, 230, 230, 255),
            control_active: rgba(214, 214, 214, 255),
            filler: rgba(224, 224, 224, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            dark: true,
            window_fill: rgba(32, 32, 32, 255),
            text: rgba(255, 255, 255, 255),
            control_fill: rgba(32, 32, 32, 255),
            control_hover: rgba(48, 48, 48, 255),
            control_active: rgba(60, 60, 60, 255),
            filler: rgba(64, 64, 64, 255),
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.window_fill = self.window_fill;
        visuals.panel_fill = self.window_fill;
        visuals.override_text_color = Some(self.text);
        visuals.widgets.inactive.weak_bg_fill = self.control_fill;
        visuals.widgets.inactive.bg_fill = self.control_fill;
        visuals.widgets.hovered.weak_bg_fill = self.control_hover;
        visuals.widgets.hovered.bg_fill = self.control_hover;
        visuals.widgets.active.weak_bg_fill = self.control_active;
        visuals.widgets.active.bg_fill = self.control_active;
        visuals
    }

    /// Colour of the filler bar under the shortcut list.
    pub fn filler_color(&self, style: ControlStyle) -> egui::Color32 {
        let alpha = if style.translucent { 96 } else { 255 };
        let [r, g, b, _] = self.filler.to_array();
        rgba(r, g, b, alpha)
    }
}

/// Follows the host's dark/light notifications and compositor answers.
pub struct ThemeAdapter {
    is_dark: bool,
    translucent: bool,
    light: PanelTheme,
    dark: PanelTheme,
    style: ControlStyle,
}

impl Default for ThemeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeAdapter {
    pub fn new() -> Self {
        Self {
            is_dark: false,
            translucent: false,
            light: PanelTheme::light(),
            dark: PanelTheme::dark(),
            style: ControlStyle::default(),
        }
    }

    pub fn on_theme_changed(&mut self, is_dark: bool) {
        if self.is_dark != is_dark {
            tracing::info!(is_dark, "host theme changed");
        }
        self.is_dark = is_dark;
        self.recompute();
    }

    pub fn on_visual_style(&mut self, translucent: bool) {
        tracing::debug!(translucent, "host visual style");
        self.translucent = translucent;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.style = ControlStyle::for_compositor(self.translucent);
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn theme(&self) -> &PanelTheme {
        if self.is_dark {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn control_style(&self) -> ControlStyle {
        self.style
    }
}
