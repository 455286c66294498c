/// RGBA colour, components in `[0, 1]`. Passed by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const DARK_GRAY: Color = Color::rgb(0.75, 0.75, 0.75);
    pub const SKY: Color = Color::rgb(0.5, 0.7, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DARK_GRAY
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_do_not_alias() {
        let mut a = Color::RED;
        let b = a;
        a.g = 1.0;
        assert_eq!(b, Color::RED);
        assert_eq!(a, Color::YELLOW);
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::SKY.to_array(), [0.5, 0.7, 1.0, 1.0]);
    }
}
