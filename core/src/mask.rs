/// Mask applied to special reveals, hiding nothing of the backing image's frame.
pub const FULL_COVER_MASK: &str = "mask-full";

/// Named list of CSS mask classes that can be applied to a revealed image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaskSet {
    pub name: &'static str,
    pub masks: &'static [&'static str],
}

pub const THREE_SYLLABLES: MaskSet = MaskSet {
    name: "3syllables",
    masks: &[
        "mask-left-third",
        "mask-middle-third",
        "mask-right-third",
        "mask-left-two-thirds",
        "mask-right-two-thirds",
        FULL_COVER_MASK,
    ],
};

pub const FOUR_SYLLABLES: MaskSet = MaskSet {
    name: "4syllables",
    masks: &[
        "mask-9-1",
        "mask-9-2",
        "mask-9-3",
        "mask-9-4",
        "mask-9-5",
        "mask-9-6",
        "mask-9-7",
        "mask-9-8",
        "mask-9-9",
    ],
};

const BUILTIN_SETS: &[MaskSet] = &[THREE_SYLLABLES, FOUR_SYLLABLES];

/// Lookup table from mask-set names to their masks, with a fallback for unmapped names.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaskSets {
    sets: &'static [MaskSet],
    fallback: MaskSet,
}

impl MaskSets {
    pub const fn new(sets: &'static [MaskSet], fallback: MaskSet) -> Self {
        Self { sets, fallback }
    }

    /// The two sets the stylesheet defines, falling back to [`THREE_SYLLABLES`].
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_SETS, THREE_SYLLABLES)
    }

    pub fn get(&self, name: &str) -> Option<&MaskSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    pub fn fallback(&self) -> &MaskSet {
        &self.fallback
    }

    /// Masks for `name`, or the fallback masks when `name` is `None` or unknown.
    pub fn masks_for(&self, name: Option<&str>) -> &'static [&'static str] {
        name.and_then(|name| self.get(name))
            .unwrap_or(&self.fallback)
            .masks
    }
}

impl Default for MaskSets {
    fn default() -> Self {
        Self::builtin()
    }
}
