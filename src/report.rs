use std::fmt;

use slant_blocks::BlockRegistry;
use slant_lighting::{AngledLighting, LightPalette};
use slant_world::WorldGrid;

#[inline]
fn is_solid(reg: &BlockRegistry, grid: &WorldGrid, x: usize, y: usize, z: usize) -> bool {
    let b = grid.get_block(x, y, z);
    reg.get(b.id).map(|t| t.solid).unwrap_or(true)
}

/// Cross-section at `z`, top row first.
/// `#` lit solid, `%` shadowed solid, `.` lit air, `:` shadowed air.
pub fn slice(al: &AngledLighting, grid: &WorldGrid, reg: &BlockRegistry, z: usize) -> String {
    let (w, h, _) = grid.dims();
    let mut out = String::with_capacity((w + 1) * h);
    for y in (0..h).rev() {
        for x in 0..w {
            let lit = al.is_lit(x as i32, y as i32, z as i32);
            let ch = match (is_solid(reg, grid, x, y, z), lit) {
                (true, true) => '#',
                (true, false) => '%',
                (false, true) => '.',
                (false, false) => ':',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightStats {
    pub lit_solid: usize,
    pub shadowed_solid: usize,
    pub lit_air: usize,
    pub shadowed_air: usize,
}

impl LightStats {
    pub fn collect(al: &AngledLighting, grid: &WorldGrid, reg: &BlockRegistry) -> Self {
        let (w, h, l) = grid.dims();
        let mut s = LightStats::default();
        for y in 0..h {
            for z in 0..l {
                for x in 0..w {
                    let lit = al.is_lit(x as i32, y as i32, z as i32);
                    let slot = match (is_solid(reg, grid, x, y, z), lit) {
                        (true, true) => &mut s.lit_solid,
                        (true, false) => &mut s.shadowed_solid,
                        (false, true) => &mut s.lit_air,
                        (false, false) => &mut s.shadowed_air,
                    };
                    *slot += 1;
                }
            }
        }
        s
    }

    pub fn total(&self) -> usize {
        self.lit_solid + self.shadowed_solid + self.lit_air + self.shadowed_air
    }
}

impl fmt::Display for LightStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| if self.total() == 0 { 0.0 } else { n as f64 * 100.0 / self.total() as f64 };
        writeln!(f, "solid lit       {:>10} ({:5.1}%)", self.lit_solid, pct(self.lit_solid))?;
        writeln!(f, "solid shadowed  {:>10} ({:5.1}%)", self.shadowed_solid, pct(self.shadowed_solid))?;
        writeln!(f, "air lit         {:>10} ({:5.1}%)", self.lit_air, pct(self.lit_air))?;
        write!(f, "air shadowed    {:>10} ({:5.1}%)", self.shadowed_air, pct(self.shadowed_air))
    }
}

pub fn palette_table(p: &LightPalette) -> String {
    let rows = [
        ("outside", p.outside),
        ("outside_x_side", p.outside_x_side),
        ("outside_z_side", p.outside_z_side),
        ("outside_y_bottom", p.outside_y_bottom),
        ("shadow", p.shadow),
        ("shadow_x_side", p.shadow_x_side),
        ("shadow_z_side", p.shadow_z_side),
        ("shadow_y_bottom", p.shadow_y_bottom),
    ];
    rows.iter().map(|(name, c)| format!("{:<18}{}\n", name, c)).collect()
}
