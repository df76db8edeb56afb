use slant_color::{Color, PackedColor, shade_sides};

use crate::env::{DEFAULT_SHADOWLIGHT, DEFAULT_SUNLIGHT};

/// Which face of a voxel a color is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Generic,
    Sprite,
    Top,
    Bottom,
    XSide,
    ZSide,
}

impl Face {
    pub const ALL: [Face; 6] =
        [Face::Generic, Face::Sprite, Face::Top, Face::Bottom, Face::XSide, Face::ZSide];

    /// Vertical offset of the voxel whose lit state decides this face.
    #[inline]
    pub fn sample_dy(self) -> i32 {
        match self {
            Face::Top => 1,
            _ => 0,
        }
    }
}

/// The eight packed colors handed to meshers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightPalette {
    pub outside: PackedColor,
    pub outside_x_side: PackedColor,
    pub outside_z_side: PackedColor,
    pub outside_y_bottom: PackedColor,
    pub shadow: PackedColor,
    pub shadow_x_side: PackedColor,
    pub shadow_z_side: PackedColor,
    pub shadow_y_bottom: PackedColor,
}

impl LightPalette {
    pub fn new(sun: Color, shadow: Color) -> Self {
        let mut p = Self {
            outside: PackedColor::default(),
            outside_x_side: PackedColor::default(),
            outside_z_side: PackedColor::default(),
            outside_y_bottom: PackedColor::default(),
            shadow: PackedColor::default(),
            shadow_x_side: PackedColor::default(),
            shadow_z_side: PackedColor::default(),
            shadow_y_bottom: PackedColor::default(),
        };
        p.set_sun(sun);
        p.set_shadow(shadow);
        p
    }

    pub fn set_sun(&mut self, col: Color) {
        let s = shade_sides(col);
        self.outside = col.pack();
        self.outside_x_side = s.x_side;
        self.outside_z_side = s.z_side;
        self.outside_y_bottom = s.y_bottom;
    }

    pub fn set_shadow(&mut self, col: Color) {
        let s = shade_sides(col);
        self.shadow = col.pack();
        self.shadow_x_side = s.x_side;
        self.shadow_z_side = s.z_side;
        self.shadow_y_bottom = s.y_bottom;
    }

    /// `(lit, shadowed)` colors for a face.
    ///
    /// Generic and top faces darken to the Z-side shadow, and Z faces share
    /// the X-side shadow. Meshers depend on these pairings.
    pub fn pair(&self, face: Face) -> (PackedColor, PackedColor) {
        match face {
            Face::Generic | Face::Top => (self.outside, self.shadow_z_side),
            Face::Sprite => (self.outside, self.shadow),
            Face::Bottom => (self.outside_y_bottom, self.shadow_y_bottom),
            Face::XSide => (self.outside_x_side, self.shadow_x_side),
            Face::ZSide => (self.outside_z_side, self.shadow_x_side),
        }
    }

    #[inline]
    pub fn pick(&self, face: Face, lit: bool) -> PackedColor {
        let (l, s) = self.pair(face);
        if lit { l } else { s }
    }
}

impl Default for LightPalette {
    fn default() -> Self {
        Self::new(DEFAULT_SUNLIGHT, DEFAULT_SHADOWLIGHT)
    }
}
