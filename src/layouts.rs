use crate::error::LayoutError;

/// Points per inch; every preset is measured in points.
pub const INCH: f64 = 72.0;
/// US Letter, the sheet used by all grid presets.
pub const LETTER: (f64, f64) = (8.5 * INCH, 11.0 * INCH);

/// Where a single card sits on a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Card center, in points from the page's bottom-left corner.
    pub center: (f64, f64),
    /// Counter-clockwise rotation applied to the card, in degrees.
    pub rotation: f64,
}

/// A named sheet arrangement: page size, card footprint and anchors.
#[derive(Debug, Clone)]
pub struct LayoutPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub page_size: (f64, f64),
    pub card_dim: (f64, f64),
    pub anchors: &'static [Anchor],
}

impl LayoutPreset {
    /// Number of cards placed on each sheet.
    pub fn cards_per_sheet(&self) -> usize {
        self.anchors.len()
    }

    /// Sheets needed for a deck of `deck_len` cards.
    pub fn sheets_for(&self, deck_len: usize) -> usize {
        deck_len.div_ceil(self.cards_per_sheet())
    }
}

/// Registry of built-in layout presets.
pub struct LayoutRegistry;

impl LayoutRegistry {
    /// Return every registered preset.
    pub fn list() -> Vec<&'static LayoutPreset> {
        vec![
            &POKER_9,
            &POKER_L,
            &POKER_8,
            &BRIDGE,
            &TAROT,
            &TAROT_P,
            &TAROT_L,
            &JUMBO,
            &JUMBO_L,
            &SQUARE_4_INCH,
            &SQUARE_2_INCH,
            &SINGLE,
        ]
    }

    /// Resolve a preset by name (case-insensitive).
    pub fn lookup(name: &str) -> Result<&'static LayoutPreset, LayoutError> {
        let wanted = name.trim();
        Self::list()
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LayoutError::UnknownLayout {
                name: name.to_string(),
            })
    }

    /// Preset used when a spec never selects one.
    pub fn default_preset() -> &'static LayoutPreset {
        &POKER_9
    }
}

macro_rules! anchor {
    ($x:expr, $y:expr, $rot:expr) => {
        Anchor {
            center: ($x * INCH, $y * INCH),
            rotation: $rot,
        }
    };
}

const POKER_DIM: (f64, f64) = (2.5 * INCH, 3.5 * INCH);
const TAROT_DIM: (f64, f64) = (2.75 * INCH, 4.75 * INCH);
const JUMBO_DIM: (f64, f64) = (3.34090909 * INCH, 5.25 * INCH);

static POKER_9_ANCHORS: &[Anchor] = &[
    anchor!(1.75, 9.0, 0.0),
    anchor!(4.25, 9.0, 0.0),
    anchor!(6.75, 9.0, 0.0),
    anchor!(1.75, 5.5, 0.0),
    anchor!(4.25, 5.5, 0.0),
    anchor!(6.75, 5.5, 0.0),
    anchor!(1.75, 2.0, 0.0),
    anchor!(4.25, 2.0, 0.0),
    anchor!(6.75, 2.0, 0.0),
];

static POKER_L_ANCHORS: &[Anchor] = &[
    anchor!(1.75, 9.0, 90.0),
    anchor!(4.25, 9.0, 90.0),
    anchor!(6.75, 9.0, 90.0),
    anchor!(1.75, 5.5, 90.0),
    anchor!(4.25, 5.5, 90.0),
    anchor!(6.75, 5.5, 90.0),
    anchor!(1.75, 2.0, 90.0),
    anchor!(4.25, 2.0, 90.0),
    anchor!(6.75, 2.0, 90.0),
];

static POKER_8_ANCHORS: &[Anchor] = &[
    anchor!(2.5, 9.25, -90.0),
    anchor!(6.0, 9.25, 90.0),
    anchor!(2.5, 6.75, -90.0),
    anchor!(6.0, 6.75, 90.0),
    anchor!(2.5, 4.25, -90.0),
    anchor!(6.0, 4.25, 90.0),
    anchor!(2.5, 1.75, -90.0),
    anchor!(6.0, 1.75, 90.0),
];

static BRIDGE_ANCHORS: &[Anchor] = &[
    anchor!(2.0, 9.0, 0.0),
    anchor!(4.25, 9.0, 0.0),
    anchor!(6.5, 9.0, 0.0),
    anchor!(2.0, 5.5, 0.0),
    anchor!(4.25, 5.5, 0.0),
    anchor!(6.5, 5.5, 0.0),
    anchor!(2.0, 2.0, 0.0),
    anchor!(4.25, 2.0, 0.0),
    anchor!(6.5, 2.0, 0.0),
];

static TAROT_ANCHORS: &[Anchor] = &[
    anchor!(1.875, 7.875, 0.0),
    anchor!(1.875, 3.125, 0.0),
    anchor!(5.625, 8.25, 90.0),
    anchor!(5.625, 5.5, 90.0),
    anchor!(5.625, 2.75, 90.0),
];

static TAROT_P_ANCHORS: &[Anchor] = &[
    anchor!(1.5, 8.0, 0.0),
    anchor!(4.25, 8.0, 0.0),
    anchor!(7.0, 8.0, 0.0),
    anchor!(1.5, 3.0, 0.0),
    anchor!(4.25, 3.0, 0.0),
    anchor!(7.0, 3.0, 0.0),
];

static TAROT_L_ANCHORS: &[Anchor] = &[
    anchor!(4.25, 9.625, 90.0),
    anchor!(4.25, 6.875, 90.0),
    anchor!(4.25, 4.125, 90.0),
    anchor!(4.25, 1.375, 90.0),
];

static JUMBO_ANCHORS: &[Anchor] = &[
    anchor!(2.5795455, 8.125, 0.0),
    anchor!(5.9204546, 8.125, 0.0),
    anchor!(2.5795455, 2.875, 0.0),
    anchor!(5.9204546, 2.875, 0.0),
];

static JUMBO_L_ANCHORS: &[Anchor] = &[
    anchor!(2.5795455, 8.125, 90.0),
    anchor!(5.9204546, 8.125, 90.0),
    anchor!(2.5795455, 2.875, 90.0),
    anchor!(5.9204546, 2.875, 90.0),
];

static SQUARE_4_ANCHORS: &[Anchor] = &[
    anchor!(2.25, 7.5, 0.0),
    anchor!(6.25, 7.5, 0.0),
    anchor!(2.25, 3.5, 0.0),
    anchor!(6.25, 3.5, 0.0),
];

static SQUARE_2_ANCHORS: &[Anchor] = &[
    anchor!(1.25, 9.5, 0.0),
    anchor!(3.25, 9.5, 0.0),
    anchor!(5.25, 9.5, 0.0),
    anchor!(7.25, 9.5, 0.0),
    anchor!(1.25, 7.5, 0.0),
    anchor!(3.25, 7.5, 0.0),
    anchor!(5.25, 7.5, 0.0),
    anchor!(7.25, 7.5, 0.0),
    anchor!(1.25, 5.5, 0.0),
    anchor!(3.25, 5.5, 0.0),
    anchor!(5.25, 5.5, 0.0),
    anchor!(7.25, 5.5, 0.0),
    anchor!(1.25, 3.5, 0.0),
    anchor!(3.25, 3.5, 0.0),
    anchor!(5.25, 3.5, 0.0),
    anchor!(7.25, 3.5, 0.0),
    anchor!(1.25, 1.5, 0.0),
    anchor!(3.25, 1.5, 0.0),
    anchor!(5.25, 1.5, 0.0),
    anchor!(7.25, 1.5, 0.0),
];

static SINGLE_ANCHORS: &[Anchor] = &[anchor!(1.25, 1.75, 0.0)];

static POKER_9: LayoutPreset = LayoutPreset {
    name: "poker_9",
    description: "3x3 poker cards, portrait, on letter paper.",
    page_size: LETTER,
    card_dim: POKER_DIM,
    anchors: POKER_9_ANCHORS,
};

static POKER_L: LayoutPreset = LayoutPreset {
    name: "poker_l",
    description: "3x3 poker cards turned landscape on letter paper.",
    page_size: LETTER,
    card_dim: (3.5 * INCH, 2.5 * INCH),
    anchors: POKER_L_ANCHORS,
};

static POKER_8: LayoutPreset = LayoutPreset {
    name: "poker_8",
    description: "4x2 poker cards with alternating sideways rotation.",
    page_size: LETTER,
    card_dim: POKER_DIM,
    anchors: POKER_8_ANCHORS,
};

static BRIDGE: LayoutPreset = LayoutPreset {
    name: "bridge",
    description: "3x3 narrow bridge cards on letter paper.",
    page_size: LETTER,
    card_dim: (2.25 * INCH, 3.5 * INCH),
    anchors: BRIDGE_ANCHORS,
};

static TAROT: LayoutPreset = LayoutPreset {
    name: "tarot",
    description: "Five tarot cards: two portrait, three sideways.",
    page_size: LETTER,
    card_dim: TAROT_DIM,
    anchors: TAROT_ANCHORS,
};

static TAROT_P: LayoutPreset = LayoutPreset {
    name: "tarot_p",
    description: "3x2 tarot cards, portrait.",
    page_size: LETTER,
    card_dim: TAROT_DIM,
    anchors: TAROT_P_ANCHORS,
};

static TAROT_L: LayoutPreset = LayoutPreset {
    name: "tarot_l",
    description: "Four tarot cards stacked landscape.",
    page_size: LETTER,
    card_dim: TAROT_DIM,
    anchors: TAROT_L_ANCHORS,
};

static JUMBO: LayoutPreset = LayoutPreset {
    name: "jumbo",
    description: "2x2 jumbo cards, portrait.",
    page_size: LETTER,
    card_dim: JUMBO_DIM,
    anchors: JUMBO_ANCHORS,
};

static JUMBO_L: LayoutPreset = LayoutPreset {
    name: "jumbo_l",
    description: "2x2 jumbo cards rotated a quarter turn.",
    page_size: LETTER,
    card_dim: JUMBO_DIM,
    anchors: JUMBO_L_ANCHORS,
};

static SQUARE_4_INCH: LayoutPreset = LayoutPreset {
    name: "square_4_inch",
    description: "2x2 four-inch square tiles.",
    page_size: LETTER,
    card_dim: (4.0 * INCH, 4.0 * INCH),
    anchors: SQUARE_4_ANCHORS,
};

static SQUARE_2_INCH: LayoutPreset = LayoutPreset {
    name: "square_2_inch",
    description: "4x5 two-inch square tiles.",
    page_size: LETTER,
    card_dim: (2.0 * INCH, 2.0 * INCH),
    anchors: SQUARE_2_ANCHORS,
};

static SINGLE: LayoutPreset = LayoutPreset {
    name: "single",
    description: "One poker card per page, page cut to the card.",
    page_size: POKER_DIM,
    card_dim: POKER_DIM,
    anchors: SINGLE_ANCHORS,
};
