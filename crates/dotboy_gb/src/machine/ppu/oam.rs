//! Per-line sprite selection.

pub(crate) const MAX_SPRITES_PER_LINE: usize = 10;

pub(crate) const ATTR_PALETTE1: u8 = 1 << 4;
pub(crate) const ATTR_FLIP_X: u8 = 1 << 5;
pub(crate) const ATTR_FLIP_Y: u8 = 1 << 6;
pub(crate) const ATTR_BEHIND_BG: u8 = 1 << 7;

/// One OAM entry, positions in raw OAM coordinates (Y+16, X+8).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SpriteEntry {
    pub(crate) y: u8,
    pub(crate) x: u8,
    pub(crate) tile: u8,
    pub(crate) attrs: u8,
    /// Position in OAM, 0..40.
    pub(crate) index: u8,
}

impl SpriteEntry {
    fn from_oam(index: usize, raw: &[u8]) -> Self {
        Self {
            y: raw[0],
            x: raw[1],
            tile: raw[2],
            attrs: raw[3],
            index: index as u8,
        }
    }

    fn covers(&self, line: u8, height: u8) -> bool {
        let line = u16::from(line) + 16;
        let top = u16::from(self.y);
        line >= top && line < top + u16::from(height)
    }
}

/// Pick up to ten sprites overlapping `line`, scanning OAM in table order.
///
/// X is not considered when selecting, so off-screen sprites still use a
/// slot. `out` ends up ordered by ascending X; an entry is inserted after
/// every entry with X less than or equal to its own, so on equal X the
/// lower OAM index stays first.
pub(crate) fn select_sprites(oam: &[u8; 0xA0], line: u8, height: u8, out: &mut Vec<SpriteEntry>) {
    out.clear();
    for (index, raw) in oam.chunks_exact(4).enumerate() {
        let sprite = SpriteEntry::from_oam(index, raw);
        if !sprite.covers(line, height) {
            continue;
        }
        let at = out.partition_point(|s| s.x <= sprite.x);
        out.insert(at, sprite);
        if out.len() == MAX_SPRITES_PER_LINE {
            break;
        }
    }
}
