/// Straight (non-premultiplied) RGBA color with alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 1.0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 1.0);

    // Default light: a faint warm white fan with yellow ray stubs.
    pub const DEFAULT_LIGHT: Color = Color::rgba(255, 255, 237, 0.03);
    pub const DEFAULT_RAY: Color = Color::rgba(255, 255, 0, 0.8);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS-style `hsla(h, s%, l%, a)`. `hue` is in degrees and wraps.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - 0.5 * c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgba(to_u8(r), to_u8(g), to_u8(b), alpha.clamp(0.0, 1.0))
    }

    /// Pixel value in the framebuffer layout (0RGB, alpha dropped).
    #[inline]
    pub fn pack(self) -> u32 {
        pack_rgb(self.r, self.g, self.b)
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Light and ray colors for a spawned light at `hue` degrees.
pub fn light_colors(hue: f32) -> (Color, Color) {
    (
        Color::hsla(hue, 1.0, 0.5, 0.03),
        Color::hsla(hue, 1.0, 0.5, 0.8),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        let red = Color::hsla(0.0, 1.0, 0.5, 1.0);
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));
        let green = Color::hsla(120.0, 1.0, 0.5, 1.0);
        assert_eq!((green.r, green.g, green.b), (0, 255, 0));
        let blue = Color::hsla(240.0, 1.0, 0.5, 1.0);
        assert_eq!((blue.r, blue.g, blue.b), (0, 0, 255));
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(Color::hsla(370.0, 1.0, 0.5, 1.0), Color::hsla(10.0, 1.0, 0.5, 1.0));
        assert_eq!(Color::hsla(-60.0, 1.0, 0.5, 1.0), Color::hsla(300.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn spawned_light_alphas() {
        let (light, ray) = light_colors(10.0);
        assert!((light.a - 0.03).abs() < 1e-6);
        assert!((ray.a - 0.8).abs() < 1e-6);
        assert_eq!((light.r, light.g, light.b), (ray.r, ray.g, ray.b));
    }

    #[test]
    fn pack_layout() {
        assert_eq!(Color::rgba(0x12, 0x34, 0x56, 1.0).pack(), 0x00_12_34_56);
    }
}
