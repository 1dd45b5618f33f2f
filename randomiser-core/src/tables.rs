// Fixed offsets and value sets for the Kirby's Adventure (USA) iNES image.
// Offsets are absolute file offsets, header included.

/// Ability byte values an enemy can grant when swallowed.
pub(crate) const ABILITY_VALUES: &[u8] = &[
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
    0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0xFF,
];

/// Star Rod ability. Only added to the pool when explicitly requested.
pub(crate) const STAR_ROD_ABILITY: u8 = 0x18;

/// Ability slots of enemies that grant a power in the vanilla game.
pub(crate) const ABILITY_LOCATIONS: &[usize] = &[
    0x72BA7, 0x72C1F, 0x72C07, 0x72C7F, 0x72CF7, 0x72D3F, 0x72D6F, 0x72DB7, 0x72DFF, 0x72E17,
    0x73237, 0x73297, 0x73267, 0x72E2F, 0x73117, 0x730FF, 0x732F0, 0x7324F, 0x730E7, 0x73027,
    0x73057, 0x73087, 0x72E8F, 0x7318F, 0x7330F, 0x727B7, 0x72817, 0x7372F, 0x737D7, 0x731D7,
];

/// Ability slots of enemies that grant nothing in the vanilla game.
pub(crate) const NEUTRAL_LOCATIONS: &[usize] = &[
    0x72B8F, 0x72C37, 0x72C67, 0x72C4F, 0x72CAF, 0x72CC7, 0x72E5F, 0x72F1F, 0x72E47, 0x72FF7,
    0x72F4F, 0x72DE7, 0x72F7F, 0x72FAF, 0x72FC7, 0x72F37,
];

/// Kirby palette triples, indexed by `Palette as usize`.
pub(crate) const PALETTE_VALUES: [[u8; 3]; 9] = [
    [0x20, 0x10, 0x00],
    [0x31, 0x21, 0x0F],
    [0x21, 0x11, 0x0F],
    [0x24, 0x14, 0x0F],
    [0x25, 0x15, 0x0F],
    [0x26, 0x16, 0x0F],
    [0x38, 0x28, 0x0F],
    [0x39, 0x29, 0x0F],
    [0x29, 0x19, 0x0F],
];

/// Every place Kirby's palette is loaded from. Each entry is the first of
/// three consecutive bytes.
pub(crate) const COLOR_LOCATIONS: &[usize] = &[
    0x32FEC, 0x43AC9, 0x43AF7, 0x43CE1, 0x47E4A, 0x6D5EB, 0x6D5EF, 0x711E4, 0x711EB, 0x76759,
    0x76783, 0x7679B, 0x767B3, 0x767CB, 0x767E3, 0x767FB, 0x76813, 0x7682B, 0x7684F, 0x7687B,
    0x77A61, 0x78A0D, 0x78A1D, 0x78A2D, 0x78A35, 0x79552, 0x79562, 0x7ADA6, 0x7ADB6, 0x7ADD2,
    0x2CED0, 0x2D2F6, 0x43B79, 0x43CE9, 0x5C980, 0x5C98C, 0x69D29, 0x69D49, 0x69D69, 0x69D71,
    0x69D89, 0x69DA9, 0x69DC9, 0x69DE9, 0x69E09, 0x6D5F7, 0x6DBAF, 0x6DF56, 0x711F3, 0x79542,
    0x7954A, 0x7855A, 0x7ADCA, 0x43ACD,
];

/// Door records are 5 bytes; the shuffler rewrites bytes 2..5.
pub(crate) const DOOR_FIELD_OFFSET: usize = 2;

#[derive(Copy, Clone, Debug)]
pub(crate) struct DoorLink {
    pub stage: &'static str,
    /// Hub-side door leading into the stage.
    pub entrance: usize,
    /// Door at the end of the stage leading back to the hub.
    pub exit: usize,
    /// Destination bytes written into an entrance to reach this stage.
    pub entrance_value: [u8; 3],
    /// Destination bytes written into an exit to return to this stage's hub door.
    pub exit_value: [u8; 3],
}

pub(crate) const DOOR_LINKS: &[DoorLink] = &[
    DoorLink {
        stage: "1-1",
        entrance: 0x2524B,
        exit: 0x254B7,
        entrance_value: [0x2B, 0x00, 0x24],
        exit_value: [0x00, 0x12, 0x66],
    },
    DoorLink {
        stage: "1-2",
        entrance: 0x2525A,
        exit: 0x254DF,
        entrance_value: [0x2F, 0x00, 0x24],
        exit_value: [0x00, 0x12, 0xF8],
    },
    DoorLink {
        stage: "1-3",
        entrance: 0x2525F,
        exit: 0x25502,
        entrance_value: [0x35, 0x00, 0x34],
        exit_value: [0x00, 0x13, 0x42],
    },
    DoorLink {
        stage: "1-4",
        entrance: 0x25264,
        exit: 0x25516,
        entrance_value: [0x39, 0x01, 0x21],
        exit_value: [0x00, 0x13, 0x85],
    },
    DoorLink {
        stage: "6-1",
        entrance: 0x25381,
        exit: 0x25534,
        entrance_value: [0x3D, 0x03, 0x56],
        exit_value: [0x05, 0x13, 0x88],
    },
    DoorLink {
        stage: "6-2",
        entrance: 0x25386,
        exit: 0x2556B,
        entrance_value: [0x43, 0x00, 0x23],
        exit_value: [0x05, 0x13, 0xC2],
    },
    DoorLink {
        stage: "6-3",
        entrance: 0x25390,
        exit: 0x255E3,
        entrance_value: [0x4A, 0x00, 0x23],
        exit_value: [0x05, 0x14, 0x35],
    },
    DoorLink {
        stage: "6-4",
        entrance: 0x2539F,
        exit: 0x2562E,
        entrance_value: [0x56, 0x00, 0x2A],
        exit_value: [0x05, 0x14, 0xA3],
    },
    DoorLink {
        stage: "6-5",
        entrance: 0x253A4,
        exit: 0x25651,
        entrance_value: [0x5C, 0x00, 0x23],
        exit_value: [0x05, 0x15, 0x41],
    },
    DoorLink {
        stage: "6-6",
        entrance: 0x253B3,
        exit: 0x25697,
        entrance_value: [0x61, 0x00, 0x39],
        exit_value: [0x05, 0x12, 0xAB],
    },
    DoorLink {
        stage: "7-1",
        entrance: 0x253C7,
        exit: 0x256B5,
        entrance_value: [0x6D, 0x00, 0x36],
        exit_value: [0x06, 0x12, 0x52],
    },
];
