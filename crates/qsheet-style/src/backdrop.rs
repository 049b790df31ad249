#![forbid(unsafe_code)]

//! Backdrop blur/material variants.
//!
//! The labels come from a static table rather than from variant names, so the
//! display text can differ from the identifier ("Material Dark" vs
//! `SystemMaterialDark`) and picker menus can be built by iterating
//! [`BackdropStyle::ALL`].

/// Blur or material variant rendered behind the sheet.
///
/// A sheet with no backdrop style falls back to an opaque dim layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackdropStyle {
    Regular,
    Light,
    ExtraLight,
    Dark,
    Prominent,

    SystemUltraThinMaterial,
    SystemThinMaterial,
    SystemMaterial,
    SystemThickMaterial,
    SystemChromeMaterial,

    #[default]
    SystemUltraThinMaterialDark,
    SystemThinMaterialDark,
    SystemMaterialDark,
    SystemThickMaterialDark,
    SystemChromeMaterialDark,

    SystemUltraThinMaterialLight,
    SystemThinMaterialLight,
    SystemMaterialLight,
    SystemThickMaterialLight,
    SystemChromeMaterialLight,
}

impl BackdropStyle {
    /// Every variant, in menu order.
    pub const ALL: [Self; 20] = [
        Self::Regular,
        Self::Light,
        Self::ExtraLight,
        Self::Dark,
        Self::Prominent,
        Self::SystemUltraThinMaterial,
        Self::SystemThinMaterial,
        Self::SystemMaterial,
        Self::SystemThickMaterial,
        Self::SystemChromeMaterial,
        Self::SystemUltraThinMaterialDark,
        Self::SystemThinMaterialDark,
        Self::SystemMaterialDark,
        Self::SystemThickMaterialDark,
        Self::SystemChromeMaterialDark,
        Self::SystemUltraThinMaterialLight,
        Self::SystemThinMaterialLight,
        Self::SystemMaterialLight,
        Self::SystemThickMaterialLight,
        Self::SystemChromeMaterialLight,
    ];

    /// Human-readable label for menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Light => "Light",
            Self::ExtraLight => "Extra Light",
            Self::Dark => "Dark",
            Self::Prominent => "Prominent",
            Self::SystemUltraThinMaterial => "Ultra Thin Material",
            Self::SystemThinMaterial => "Thin Material",
            Self::SystemMaterial => "Material",
            Self::SystemThickMaterial => "Thick Material",
            Self::SystemChromeMaterial => "Chrome Material",
            Self::SystemUltraThinMaterialDark => "Ultra Thin Material Dark",
            Self::SystemThinMaterialDark => "Thin Material Dark",
            Self::SystemMaterialDark => "Material Dark",
            Self::SystemThickMaterialDark => "Thick Material Dark",
            Self::SystemChromeMaterialDark => "Chrome Material Dark",
            Self::SystemUltraThinMaterialLight => "Ultra Thin Material Light",
            Self::SystemThinMaterialLight => "Thin Material Light",
            Self::SystemMaterialLight => "Material Light",
            Self::SystemThickMaterialLight => "Thick Material Light",
            Self::SystemChromeMaterialLight => "Chrome Material Light",
        }
    }

    /// Look a variant up by its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.label() == label)
    }
}

impl core::fmt::Display for BackdropStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for an optional backdrop; `None` is the opaque dim fallback.
#[must_use]
pub const fn backdrop_label(style: Option<BackdropStyle>) -> &'static str {
    match style {
        Some(style) => style.label(),
        None => "No Blur",
    }
}
