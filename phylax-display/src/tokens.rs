//! The standard panel display-token vocabulary.
//!
//! Each display payload byte selects one entry: a word, a single
//! character, or a control token. Control tokens are recognized by the
//! renderer through their first character: `\n` marks a line break,
//! `\x08` a backspace, and `[!]` flags the following token to blink.
//! Absent entries render as `?`.

/// Immutable byte-to-text lookup table, injected into the render
/// functions.
pub struct TokenTable([Option<&'static str>; 256]);

impl TokenTable {
    /// Build a table from explicit entries.
    pub const fn new(entries: [Option<&'static str>; 256]) -> Self {
        Self(entries)
    }

    /// Text for a token byte, if the vocabulary defines one.
    pub fn get(&self, byte: u8) -> Option<&'static str> {
        self.0[byte as usize]
    }
}

/// The standard vocabulary spoken by the panel.
pub const PANEL_TOKENS: TokenTable = TokenTable(panel_entries());

const fn panel_entries() -> [Option<&'static str>; 256] {
    let mut t: [Option<&'static str>; 256] = [None; 256];
    t[0x00] = Some("0");
    t[0x01] = Some("1");
    t[0x02] = Some("2");
    t[0x03] = Some("3");
    t[0x04] = Some("4");
    t[0x05] = Some("5");
    t[0x06] = Some("6");
    t[0x07] = Some("7");
    t[0x08] = Some("8");
    t[0x09] = Some("9");

    // Punctuation, letters, and the word vocabulary
    t[0x0C] = Some("#");
    t[0x0D] = Some(":");
    t[0x0E] = Some("/");
    t[0x0F] = Some("?");
    t[0x10] = Some(".");
    t[0x11] = Some("A");
    t[0x12] = Some("B");
    t[0x13] = Some("C");
    t[0x14] = Some("D");
    t[0x15] = Some("E");
    t[0x16] = Some("F");
    t[0x17] = Some("G");
    t[0x18] = Some("H");
    t[0x19] = Some("I");
    t[0x1A] = Some("J");
    t[0x1B] = Some("K");
    t[0x1C] = Some("L");
    t[0x1D] = Some("M");
    t[0x1E] = Some("N");
    t[0x1F] = Some("O");
    t[0x20] = Some("P");
    t[0x21] = Some("Q");
    t[0x22] = Some("R");
    t[0x23] = Some("S");
    t[0x24] = Some("T");
    t[0x25] = Some("U");
    t[0x26] = Some("V");
    t[0x27] = Some("W");
    t[0x28] = Some("X");
    t[0x29] = Some("Y");
    t[0x2A] = Some("Z");
    t[0x2B] = Some(" ");
    t[0x2C] = Some("'");
    t[0x2D] = Some("-");
    t[0x2E] = Some("_");
    t[0x2F] = Some("*");
    t[0x30] = Some("AC POWER ");
    t[0x31] = Some("ACCESS ");
    t[0x32] = Some("ACCOUNT ");
    t[0x33] = Some("ALARM ");
    t[0x34] = Some("ALL ");
    t[0x35] = Some("ARM ");
    t[0x36] = Some("ARMING ");
    t[0x37] = Some("AREA ");
    t[0x38] = Some("ATTIC ");
    t[0x39] = Some("AUTO ");
    t[0x3A] = Some("AUXILIARY ");
    t[0x3B] = Some("AWAY ");
    t[0x3C] = Some("BACK ");
    t[0x3D] = Some("BATTERY ");
    t[0x3E] = Some("BEDROOM ");
    t[0x3F] = Some("BEEPS ");
    t[0x40] = Some("BOTTOM ");
    t[0x41] = Some("BREEZEWAY ");
    t[0x42] = Some("BASEMENT ");
    t[0x43] = Some("BATHROOM ");
    t[0x44] = Some("BUS ");
    t[0x45] = Some("BYPASS ");
    t[0x46] = Some("BYPASSED ");
    t[0x47] = Some("CABINET ");
    t[0x48] = Some("CANCELED ");
    t[0x49] = Some("CARPET ");
    t[0x4A] = Some("CHIME ");
    t[0x4B] = Some("CLOSET ");
    t[0x4C] = Some("CLOSING ");
    t[0x4D] = Some("CODE ");
    t[0x4E] = Some("CONTROL ");
    t[0x4F] = Some("CPU ");
    t[0x50] = Some("DEGREES ");
    t[0x51] = Some("DEN ");
    t[0x52] = Some("DESK ");
    t[0x53] = Some("DELAY ");
    t[0x54] = Some("DELETE ");
    t[0x55] = Some("DINING ");
    t[0x56] = Some("DIRECT ");
    t[0x57] = Some("DOOR ");
    t[0x58] = Some("DOWN ");
    t[0x59] = Some("DOWNLOAD ");
    t[0x5A] = Some("DOWNSTAIRS ");
    t[0x5B] = Some("DRAWER ");
    t[0x5C] = Some("DISPLAY ");
    t[0x5D] = Some("DURESS ");
    t[0x5E] = Some("EAST ");
    t[0x5F] = Some("ENERGY SAVER ");
    t[0x60] = Some("ENTER ");
    t[0x61] = Some("ENTRY ");
    t[0x62] = Some("ERROR ");
    t[0x63] = Some("EXIT ");
    t[0x64] = Some("FAIL ");
    t[0x65] = Some("FAILURE ");
    t[0x66] = Some("FAMILY ");
    t[0x67] = Some("FEATURES ");
    t[0x68] = Some("FIRE ");
    t[0x69] = Some("FIRST ");
    t[0x6A] = Some("FLOOR ");
    t[0x6B] = Some("FORCE ");
    t[0x6C] = Some("FORMAT ");
    t[0x6D] = Some("FREEZE ");
    t[0x6E] = Some("FRONT ");
    t[0x6F] = Some("FURNACE ");
    t[0x70] = Some("GARAGE ");
    t[0x71] = Some("GALLERY ");
    t[0x72] = Some("GOODBYE ");
    t[0x73] = Some("GROUP ");
    t[0x74] = Some("HALL ");
    t[0x75] = Some("HEAT ");
    t[0x76] = Some("HELLO ");
    t[0x77] = Some("HELP ");
    t[0x78] = Some("HIGH ");
    t[0x79] = Some("HOURLY ");
    t[0x7A] = Some("HOUSE ");
    t[0x7B] = Some("IMMEDIATE ");
    t[0x7C] = Some("IN SERVICE ");
    t[0x7D] = Some("INTERIOR ");
    t[0x7E] = Some("INTRUSION ");
    t[0x7F] = Some("INVALID ");
    t[0x80] = Some("IS ");

    t[0x81] = Some("KEY ");
    t[0x82] = Some("KITCHEN ");
    t[0x83] = Some("LAUNDRY ");
    t[0x84] = Some("LEARN ");
    t[0x85] = Some("LEFT ");
    t[0x86] = Some("LIBRARY ");
    t[0x87] = Some("LEVEL ");
    t[0x88] = Some("LIGHT ");
    t[0x89] = Some("LIGHTS ");
    t[0x8A] = Some("LIVING ");
    t[0x8B] = Some("LOW ");
    t[0x8C] = Some("MAIN ");
    t[0x8D] = Some("MASTER ");
    t[0x8E] = Some("MEDICAL");
    t[0x8F] = Some("MEMORY ");
    t[0x90] = Some("MIN ");
    t[0x91] = Some("MODE ");
    t[0x92] = Some("MOTION ");
    t[0x93] = Some("NIGHT ");
    t[0x94] = Some("NORTH ");
    t[0x95] = Some("NOT ");
    t[0x96] = Some("NUMBER ");
    t[0x97] = Some("OFF ");
    t[0x98] = Some("OFFICE ");
    t[0x99] = Some("OK ");
    t[0x9A] = Some("ON ");
    t[0x9B] = Some("OPEN ");
    t[0x9C] = Some("OPENING ");
    t[0x9D] = Some("PANIC ");
    t[0x9E] = Some("PARTITION ");
    t[0x9F] = Some("PATIO ");
    t[0xA0] = Some("PHONE ");
    t[0xA1] = Some("POLICE ");
    t[0xA2] = Some("POOL ");
    t[0xA3] = Some("PORCH ");
    t[0xA4] = Some("PRESS ");
    t[0xA5] = Some("QUIET ");
    t[0xA6] = Some("QUICK ");
    t[0xA7] = Some("RECEIVER ");
    t[0xA8] = Some("REAR ");
    t[0xA9] = Some("REPORT ");
    t[0xAA] = Some("REMOTE ");
    t[0xAB] = Some("RESTORE ");
    t[0xAC] = Some("RIGHT ");
    t[0xAD] = Some("ROOM ");
    t[0xAE] = Some("SCHEDULE ");
    t[0xAF] = Some("SCRIPT ");
    t[0xB0] = Some("SEC ");
    t[0xB1] = Some("SECOND ");
    t[0xB2] = Some("SET ");
    t[0xB3] = Some("SENSOR ");
    t[0xB4] = Some("SHOCK ");
    t[0xB5] = Some("SIDE ");
    t[0xB6] = Some("SIREN ");
    t[0xB7] = Some("SLIDING ");
    t[0xB8] = Some("SMOKE ");
    t[0xB9] = Some("Sn ");
    t[0xBA] = Some("SOUND ");
    t[0xBB] = Some("SOUTH ");
    t[0xBC] = Some("SPECIAL ");
    t[0xBD] = Some("STAIRS ");
    t[0xBE] = Some("START ");
    t[0xBF] = Some("STATUS ");
    t[0xC0] = Some("STAY ");
    t[0xC1] = Some("STOP ");
    t[0xC2] = Some("SUPERVISORY ");
    t[0xC3] = Some("SYSTEM ");
    t[0xC4] = Some("TAMPER ");
    t[0xC5] = Some("TEMPERATURE ");
    t[0xC6] = Some("TEMPORARY ");
    t[0xC7] = Some("TEST ");
    t[0xC8] = Some("TIME ");
    t[0xC9] = Some("TIMEOUT ");
    t[0xCA] = Some("TOUCHPAD ");
    t[0xCB] = Some("TRIP ");
    t[0xCC] = Some("TROUBLE ");
    t[0xCD] = Some("UNBYPASS ");
    t[0xCE] = Some("UNIT ");
    t[0xCF] = Some("UP ");
    t[0xD0] = Some("VERIFY ");
    t[0xD1] = Some("VIOLATION ");
    t[0xD2] = Some("WARNING ");
    t[0xD3] = Some("WEST ");
    t[0xD4] = Some("WINDOW ");
    t[0xD5] = Some("MENU ");
    t[0xD6] = Some("RETURN ");
    t[0xD7] = Some("POUND ");
    t[0xD8] = Some("HOME ");

    // Display control tokens
    t[0xF9] = Some("\n");
    t[0xFA] = Some(" ");
    t[0xFB] = Some("\n");
    t[0xFD] = Some("\x08");
    t[0xFE] = Some("[!]");
    t
}
