//! Attack ids, as reported by the post-frame `last_attack_landed` field.

pseudo_enum!(Attack: u8 {
	0x01 => NON_STAPLE,
	0x02 => JAB_1,
	0x03 => JAB_2,
	0x04 => JAB_3,
	0x05 => RAPID_JABS,
	0x06 => DASH_ATTACK,
	0x07 => FTILT,
	0x08 => UTILT,
	0x09 => DTILT,
	0x0A => FSMASH,
	0x0B => USMASH,
	0x0C => DSMASH,
	0x0D => NAIR,
	0x0E => FAIR,
	0x0F => BAIR,
	0x10 => UAIR,
	0x11 => DAIR,
	0x12 => NEUTRAL_SPECIAL,
	0x13 => SIDE_SPECIAL,
	0x14 => UP_SPECIAL,
	0x15 => DOWN_SPECIAL,
	0x32 => KIRBY_HAT_MARIO_NEUTRAL_SPECIAL,
	0x33 => KIRBY_HAT_FOX_NEUTRAL_SPECIAL,
	0x34 => KIRBY_HAT_CFALCON_NEUTRAL_SPECIAL,
	0x35 => KIRBY_HAT_DK_NEUTRAL_SPECIAL,
	0x36 => KIRBY_HAT_BOWSER_NEUTRAL_SPECIAL,
	0x37 => KIRBY_HAT_LINK_NEUTRAL_SPECIAL,
	0x38 => KIRBY_HAT_SHEIK_NEUTRAL_SPECIAL,
	0x39 => KIRBY_HAT_NESS_NEUTRAL_SPECIAL,
	0x3A => KIRBY_HAT_PEACH_NEUTRAL_SPECIAL,
	0x3B => KIRBY_HAT_ICE_CLIMBER_NEUTRAL_SPECIAL,
	0x3C => KIRBY_HAT_PIKACHU_NEUTRAL_SPECIAL,
	0x3D => KIRBY_HAT_SAMUS_NEUTRAL_SPECIAL,
	0x3E => KIRBY_HAT_YOSHI_NEUTRAL_SPECIAL,
	0x3F => KIRBY_HAT_JIGGLYPUFF_NEUTRAL_SPECIAL,
	0x40 => KIRBY_HAT_MEWTWO_NEUTRAL_SPECIAL,
	0x41 => KIRBY_HAT_LUIGI_NEUTRAL_SPECIAL,
	0x42 => KIRBY_HAT_MARTH_NEUTRAL_SPECIAL,
	0x43 => KIRBY_HAT_ZELDA_NEUTRAL_SPECIAL,
	0x44 => KIRBY_HAT_YOUNG_LINK_NEUTRAL_SPECIAL,
	0x45 => KIRBY_HAT_DOC_NEUTRAL_SPECIAL,
	0x46 => KIRBY_HAT_FALCO_NEUTRAL_SPECIAL,
	0x47 => KIRBY_HAT_PICHU_NEUTRAL_SPECIAL,
	0x48 => KIRBY_HAT_GAME_AND_WATCH_NEUTRAL_SPECIAL,
	0x49 => KIRBY_HAT_GANONDORF_NEUTRAL_SPECIAL,
	0x4A => KIRBY_HAT_ROY_NEUTRAL_SPECIAL,
	0x4E => GET_UP_ATTACK_FROM_BACK,
	0x4F => GET_UP_ATTACK_FROM_FRONT,
	0x50 => PUMMEL,
	0x51 => FTHROW,
	0x52 => BTHROW,
	0x53 => UTHROW,
	0x54 => DTHROW,
	0x55 => CARGO_FTHROW,
	0x56 => CARGO_BTHROW,
	0x57 => CARGO_UTHROW,
	0x58 => CARGO_DTHROW,
	0x59 => LEDGE_GET_UP_ATTACK_100,
	0x5A => LEDGE_GET_UP_ATTACK,
	0x5B => BEAM_SWORD_JAB,
	0x5C => BEAM_SWORD_TILT_SWING,
	0x5D => BEAM_SWORD_SMASH_SWING,
	0x5E => BEAM_SWORD_DASH_SWING,
	0x5F => HOME_RUN_BAT_JAB,
	0x60 => HOME_RUN_BAT_TILT_SWING,
	0x61 => HOME_RUN_BAT_SMASH_SWING,
	0x62 => HOME_RUN_BAT_DASH_SWING,
	0x63 => PARASOL_JAB,
	0x64 => PARASOL_TILT_SWING,
	0x65 => PARASOL_SMASH_SWING,
	0x66 => PARASOL_DASH_SWING,
	0x67 => FAN_JAB,
	0x68 => FAN_TILT_SWING,
	0x69 => FAN_SMASH_SWING,
	0x6A => FAN_DASH_SWING,
	0x6B => STAR_ROD_JAB,
	0x6C => STAR_ROD_TILT_SWING,
	0x6D => STAR_ROD_SMASH_SWING,
	0x6E => STAR_ROD_DASH_SWING,
	0x6F => LIP_STICK_JAB,
	0x70 => LIP_STICK_TILT_SWING,
	0x71 => LIP_STICK_SMASH_SWING,
	0x72 => LIP_STICK_DASH_SWING,
	0x73 => OPEN_PARASOL,
	0x74 => RAY_GUN_SHOOT,
	0x75 => FIRE_FLOWER_SHOOT,
	0x76 => SCREW_ATTACK,
	0x77 => SUPER_SCOPE_RAPID,
	0x78 => SUPER_SCOPE_CHARGED,
	0x79 => HAMMER,
});
