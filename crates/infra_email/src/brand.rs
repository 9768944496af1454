//! Brand identity used by the email layout

/// Colour palette, matching the website
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Forest green
    pub primary: &'static str,
    pub primary_dark: &'static str,
    /// Header gradient start
    pub primary_deep: &'static str,
    /// Warm cream-white page background
    pub background: &'static str,
    pub summary_box: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub white: &'static str,
    /// Copper, for calls to action
    pub accent: &'static str,
}

/// Sender identity and copy shared by every template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brand {
    pub name: &'static str,
    /// Service line under the logo
    pub services: &'static str,
    /// Footer claim
    pub tagline: &'static str,
    pub support_email: &'static str,
    /// Call-to-action target in the calculator email
    pub booking_url: &'static str,
    pub palette: Palette,
}

impl Brand {
    pub const PALVAR: Brand = Brand {
        name: "PALVAR",
        services: "Energieberatung | Projektmanagement | Gebäudeservices",
        tagline: "Ihr Partner für nachhaltige Gebäudelösungen",
        support_email: "service@palvar.de",
        booking_url: "https://palvar.de/booking",
        palette: Palette {
            primary: "#2e7d5e",
            primary_dark: "#1a4d3a",
            primary_deep: "#0f3528",
            background: "#fdfcfa",
            summary_box: "#f5f3f0",
            text: "#1f2d25",
            text_muted: "#5a6b5f",
            border: "#e5e0da",
            white: "#ffffff",
            accent: "#c26a37",
        },
    };

    /// Display name for booking-related admin mail
    pub fn booking_sender(&self) -> String {
        format!("{} Buchung", self.name)
    }
}

impl Default for Brand {
    fn default() -> Self {
        Brand::PALVAR
    }
}
