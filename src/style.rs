use crate::foundation::pixels::Argb8;

/// Lower bound applied to every mapped radius.
pub const MIN_STYLE_RADIUS: f32 = 0.1;
/// Upper bound applied to every mapped radius.
pub const MAX_STYLE_RADIUS: f32 = 25.0;

/// Named material styles. Unknown tags fall back to [`BlurStyle::Regular`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum BlurStyle {
    ExtraLight,
    Light,
    #[default]
    Regular,
    Prominent,
    Dark,
    SystemUltraThinMaterial,
    SystemThinMaterial,
    SystemMaterial,
    SystemThickMaterial,
    SystemChromeMaterial,
}

impl BlurStyle {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "extraLight" => Self::ExtraLight,
            "light" => Self::Light,
            "regular" => Self::Regular,
            "prominent" => Self::Prominent,
            "dark" => Self::Dark,
            "systemUltraThinMaterial" => Self::SystemUltraThinMaterial,
            "systemThinMaterial" => Self::SystemThinMaterial,
            "systemMaterial" => Self::SystemMaterial,
            "systemThickMaterial" => Self::SystemThickMaterial,
            "systemChromeMaterial" => Self::SystemChromeMaterial,
            _ => Self::Regular,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::ExtraLight => "extraLight",
            Self::Light => "light",
            Self::Regular => "regular",
            Self::Prominent => "prominent",
            Self::Dark => "dark",
            Self::SystemUltraThinMaterial => "systemUltraThinMaterial",
            Self::SystemThinMaterial => "systemThinMaterial",
            Self::SystemMaterial => "systemMaterial",
            Self::SystemThickMaterial => "systemThickMaterial",
            Self::SystemChromeMaterial => "systemChromeMaterial",
        }
    }
}

/// Visual parameters a style maps to: blur radius plus tint overlay color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StyleParameters {
    pub radius: f32,
    pub tint: Argb8,
}

/// Map a material style and a 0-100 blur amount to concrete parameters.
///
/// The amount normalizes to an intensity in `[0, 1]` that scales both the
/// radius and the tint alpha; the radius is finally clamped between
/// [`MIN_STYLE_RADIUS`] and [`MAX_STYLE_RADIUS`].
pub fn style_parameters(style: BlurStyle, amount: f32) -> StyleParameters {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let intensity = (amount / 100.0).clamp(0.0, 1.0);

    let (radius_scale, alpha_scale, r, g, b) = match style {
        BlurStyle::ExtraLight => (6.0, 0.85, 255, 255, 255),
        BlurStyle::Light => (8.0, 0.70, 255, 255, 255),
        BlurStyle::Regular => (8.0, 0.40, 255, 255, 255),
        BlurStyle::Prominent => (12.0, 0.50, 240, 240, 240),
        BlurStyle::Dark => (10.0, 0.70, 20, 20, 20),
        BlurStyle::SystemUltraThinMaterial => (4.0, 0.20, 250, 250, 250),
        BlurStyle::SystemThinMaterial => (6.0, 0.35, 245, 245, 245),
        BlurStyle::SystemMaterial => (8.0, 0.50, 240, 240, 240),
        BlurStyle::SystemThickMaterial => (12.0, 0.65, 235, 235, 235),
        BlurStyle::SystemChromeMaterial => (10.0, 0.80, 248, 248, 248),
    };

    StyleParameters {
        radius: (intensity * radius_scale).clamp(MIN_STYLE_RADIUS, MAX_STYLE_RADIUS),
        tint: Argb8::new((alpha_scale * intensity * 255.0) as u8, r, g, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_falls_back_to_regular() {
        assert_eq!(BlurStyle::from_tag("frosted-unicorn"), BlurStyle::Regular);
        assert_eq!(BlurStyle::from_tag(""), BlurStyle::Regular);
    }

    #[test]
    fn tags_roundtrip() {
        for style in [
            BlurStyle::ExtraLight,
            BlurStyle::Light,
            BlurStyle::Regular,
            BlurStyle::Prominent,
            BlurStyle::Dark,
            BlurStyle::SystemUltraThinMaterial,
            BlurStyle::SystemThinMaterial,
            BlurStyle::SystemMaterial,
            BlurStyle::SystemThickMaterial,
            BlurStyle::SystemChromeMaterial,
        ] {
            assert_eq!(BlurStyle::from_tag(style.tag()), style);
        }
    }

    #[test]
    fn full_amount_regular_maps_to_radius_8() {
        let params = style_parameters(BlurStyle::Regular, 100.0);
        assert_eq!(params.radius, 8.0);
        assert_eq!(params.tint, Argb8::new(102, 255, 255, 255));
    }

    #[test]
    fn dark_style_uses_dark_tint() {
        let params = style_parameters(BlurStyle::Dark, 100.0);
        assert_eq!(params.radius, 10.0);
        assert_eq!(params.tint, Argb8::new(178, 20, 20, 20));
    }

    #[test]
    fn half_amount_halves_radius_and_alpha() {
        let params = style_parameters(BlurStyle::SystemThickMaterial, 50.0);
        assert_eq!(params.radius, 6.0);
        assert_eq!(params.tint.a, (0.65 * 0.5 * 255.0) as u8);
    }

    #[test]
    fn amount_is_clamped_and_radius_has_a_floor() {
        let zero = style_parameters(BlurStyle::Regular, 0.0);
        assert_eq!(zero.radius, MIN_STYLE_RADIUS);
        assert_eq!(zero.tint.a, 0);

        let over = style_parameters(BlurStyle::Regular, 400.0);
        assert_eq!(over.radius, 8.0);

        let nan = style_parameters(BlurStyle::Regular, f32::NAN);
        assert_eq!(nan.radius, MIN_STYLE_RADIUS);
    }

    #[test]
    fn styles_serialize_with_camel_case_tags() {
        let json = serde_json::to_string(&BlurStyle::SystemUltraThinMaterial).unwrap();
        assert_eq!(json, "\"systemUltraThinMaterial\"");
    }
}
