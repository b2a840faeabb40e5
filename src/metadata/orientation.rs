/// EXIF orientation, as the eight textual labels used in tag mappings and the
/// numeric codes from the EXIF standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    /// Flip horizontal + rotate 270 CW.
    Transpose,
    Rotate90,
    /// Flip vertical + rotate 90 CW.
    Transverse,
    Rotate270,
}

const TABLE: [(Orientation, &str, u8); 8] = [
    (Orientation::Normal, "Normal", 1),
    (Orientation::FlipHorizontal, "Flip Horizontal", 2),
    (Orientation::Rotate180, "Rotate 180 CW", 3),
    (Orientation::FlipVertical, "Flip Vertical", 4),
    (Orientation::Transpose, "Transpose", 5),
    (Orientation::Rotate90, "Rotate 90 CW", 6),
    (Orientation::Transverse, "Transverse", 7),
    (Orientation::Rotate270, "Rotate 270 CW", 8),
];

impl Orientation {
    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(o, _, _)| *o)
    }

    pub fn from_code(code: u32) -> Option<Self> {
        TABLE
            .iter()
            .find(|(_, _, c)| u32::from(*c) == code)
            .map(|(o, _, _)| *o)
    }

    pub fn label(self) -> &'static str {
        self.entry().1
    }

    pub fn code(self) -> u8 {
        self.entry().2
    }

    fn entry(self) -> &'static (Orientation, &'static str, u8) {
        // TABLE is indexed in code order
        &TABLE[self as usize]
    }
}
