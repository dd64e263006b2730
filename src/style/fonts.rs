//! Font families available for card text and headings
//!
//! Each family is a named key that maps to a CSS font stack. The stacks use
//! single quotes so they can be dropped into a double-quoted `style`
//! attribute without terminating it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Font Family
// ─────────────────────────────────────────────────────────────────────────────

/// Available font families for body text and headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Inter")]
    Inter,
    #[serde(rename = "Eudoxus Sans")]
    EudoxusSans,
    #[serde(rename = "SF Pro Display")]
    SfProDisplay,
    #[serde(rename = "Helvetica Neue")]
    HelveticaNeue,
    #[serde(rename = "Avenir")]
    Avenir,
    #[serde(rename = "Circular")]
    Circular,
    #[serde(rename = "Poppins")]
    Poppins,
    #[serde(rename = "Montserrat")]
    Montserrat,
    #[serde(rename = "Source Sans Pro")]
    SourceSansPro,
    #[serde(rename = "Roboto")]
    Roboto,
    #[serde(rename = "Open Sans")]
    OpenSans,
    #[serde(rename = "Lato")]
    Lato,
}

impl FontFamily {
    /// Get the display name for the font.
    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::EudoxusSans => "Eudoxus Sans",
            FontFamily::SfProDisplay => "SF Pro Display",
            FontFamily::HelveticaNeue => "Helvetica Neue",
            FontFamily::Avenir => "Avenir",
            FontFamily::Circular => "Circular",
            FontFamily::Poppins => "Poppins",
            FontFamily::Montserrat => "Montserrat",
            FontFamily::SourceSansPro => "Source Sans Pro",
            FontFamily::Roboto => "Roboto",
            FontFamily::OpenSans => "Open Sans",
            FontFamily::Lato => "Lato",
        }
    }

    /// CSS `font-family` value, with system fallbacks.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Inter => {
                "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif"
            }
            FontFamily::EudoxusSans => {
                "'Eudoxus Sans', 'Eudoxus Sans Bold', -apple-system, BlinkMacSystemFont, sans-serif"
            }
            FontFamily::SfProDisplay => {
                "'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif"
            }
            FontFamily::HelveticaNeue => "'Helvetica Neue', Helvetica, Arial, sans-serif",
            FontFamily::Avenir => "'Avenir Next', Avenir, sans-serif",
            FontFamily::Circular => "'Circular', -apple-system, BlinkMacSystemFont, sans-serif",
            FontFamily::Poppins => "'Poppins', sans-serif",
            FontFamily::Montserrat => "'Montserrat', sans-serif",
            FontFamily::SourceSansPro => "'Source Sans Pro', sans-serif",
            FontFamily::Roboto => "'Roboto', sans-serif",
            FontFamily::OpenSans => "'Open Sans', sans-serif",
            FontFamily::Lato => "'Lato', sans-serif",
        }
    }

    /// Get all available fonts.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Inter,
            FontFamily::EudoxusSans,
            FontFamily::SfProDisplay,
            FontFamily::HelveticaNeue,
            FontFamily::Avenir,
            FontFamily::Circular,
            FontFamily::Poppins,
            FontFamily::Montserrat,
            FontFamily::SourceSansPro,
            FontFamily::Roboto,
            FontFamily::OpenSans,
            FontFamily::Lato,
        ]
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    /// Parse a display name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FontFamily::all()
            .iter()
            .copied()
            .find(|font| font.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown font family '{}'", wanted))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Web Font Imports
// ─────────────────────────────────────────────────────────────────────────────

/// Stylesheet that pulls in the web fonts used by the card.
///
/// Fonts that are not published on a CDN fall back through their stacks.
pub const WEB_FONT_CSS: &str = r#"@import url('https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap');
@import url('https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;600;700&display=swap');
@import url('https://fonts.googleapis.com/css2?family=Montserrat:wght@300;400;500;600;700&display=swap');
@import url('https://fonts.googleapis.com/css2?family=Source+Sans+Pro:wght@300;400;600;700&display=swap');
@import url('https://fonts.googleapis.com/css2?family=Roboto:wght@300;400;500;700&display=swap');
@import url('https://fonts.googleapis.com/css2?family=Open+Sans:wght@300;400;600;700&display=swap');
@import url('https://fonts.googleapis.com/css2?family=Lato:wght@300;400;700&display=swap');

@font-face {
    font-family: 'Eudoxus Sans';
    src: url('https://fonts.cdnfonts.com/s/19990/EudoxusSans-Regular.woff') format('woff');
    font-weight: 400;
    font-style: normal;
}

@font-face {
    font-family: 'Eudoxus Sans';
    src: url('https://fonts.cdnfonts.com/s/19990/EudoxusSans-Bold.woff') format('woff');
    font-weight: 700;
    font-style: normal;
}"#;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
