//! Item type ids, as they appear in item-update events. Projectile ids vary
//! by game version more than the common items do; unknown ids pass through.

pseudo_enum!(Item: u16 {
	0x00 => CAPSULE,
	0x01 => BOX,
	0x02 => BARREL,
	0x03 => EGG,
	0x04 => PARTY_BALL,
	0x05 => BARREL_CANNON,
	0x06 => BOB_OMB,
	0x07 => MR_SATURN,
	0x08 => HEART_CONTAINER,
	0x09 => MAXIM_TOMATO,
	0x0A => STARMAN,
	0x0B => HOME_RUN_BAT,
	0x0C => BEAM_SWORD,
	0x0D => PARASOL,
	0x0E => GREEN_SHELL,
	0x0F => RED_SHELL,
	0x10 => RAY_GUN,
	0x11 => FREEZIE,
	0x12 => FOOD,
	0x13 => MOTION_SENSOR_BOMB,
	0x14 => FLIPPER,
	0x15 => SUPER_SCOPE,
	0x16 => STAR_ROD,
	0x17 => LIP_STICK,
	0x18 => FAN,
	0x19 => FIRE_FLOWER,
	0x1A => SUPER_MUSHROOM,
	0x1B => POISON_MUSHROOM,
	0x1C => HAMMER,
	0x1D => WARP_STAR,
	0x1E => SCREW_ATTACK,
	0x1F => BUNNY_HOOD,
	0x20 => METAL_BOX,
	0x21 => CLOAKING_DEVICE,
	0x22 => POKE_BALL,
	0x2A => TARGET,
	0x2B => SHY_GUY,
	0x2C => KOOPA_PARATROOPA,
	0x30 => MARIO_FIREBALL,
	0x31 => DR_MARIO_CAPSULE,
	0x32 => KIRBY_CUTTER_BEAM,
	0x33 => KIRBY_HAMMER,
	0x35 => FOX_LASER,
	0x36 => FALCO_LASER,
	0x37 => FOX_SHADOW,
	0x38 => FALCO_SHADOW,
	0x39 => LINK_BOMB,
	0x3A => YOUNG_LINK_BOMB,
	0x3B => LINK_BOOMERANG,
	0x3C => YOUNG_LINK_BOOMERANG,
	0x3D => LINK_HOOKSHOT,
	0x3E => YOUNG_LINK_HOOKSHOT,
	0x3F => ARROW,
	0x40 => FIRE_ARROW,
	0x41 => PK_FIRE,
	0x42 => PK_FLASH,
	0x43 => PK_FLASH_EXPLOSION,
	0x44 => PK_THUNDER_HEAD,
	0x45 => PK_THUNDER_TAIL_1,
	0x46 => PK_THUNDER_TAIL_2,
	0x47 => PK_THUNDER_TAIL_3,
	0x48 => PK_THUNDER_TAIL_4,
	0x49 => FOX_BLASTER,
	0x4A => FALCO_BLASTER,
	0x4B => LINK_BOW,
	0x4C => YOUNG_LINK_BOW,
	0x4D => NESS_BAT,
	0x4E => NESS_YOYO,
	0x4F => PEACH_PARASOL,
	0x50 => PEACH_TOAD,
	0x51 => LUIGI_FIREBALL,
	0x52 => ICE_CLIMBERS_ICE_BLOCK,
	0x53 => ZELDA_FIRE,
	0x54 => ZELDA_FIRE_EXPLOSION,
	0x55 => SAMUS_BOMB,
	0x56 => SAMUS_CHARGE_SHOT,
	0x57 => SAMUS_MISSILE,
	0x58 => SAMUS_GRAPPLE_BEAM,
	0x59 => SHEIK_NEEDLE_THROWN,
	0x5A => SHEIK_NEEDLE_HELD,
	0x5B => SHEIK_CHAIN,
	0x5D => PEACH_TURNIP,
	0x5E => BOWSER_FLAME,
	0x5F => NESS_PK_FLASH,
	0x60 => PIKACHU_THUNDER,
	0x61 => PICHU_THUNDER,
	0x62 => MARIO_CAPE,
	0x63 => DR_MARIO_SHEET,
	0x64 => LUIGI_CYCLONE,
	0x65 => YOSHI_EGG_THROWN,
	0x66 => YOSHI_TONGUE,
	0x67 => YOSHI_STAR,
	0x68 => PIKACHU_THUNDER_JOLT_GROUND,
	0x69 => PIKACHU_THUNDER_JOLT_AIR,
	0x6A => PICHU_THUNDER_JOLT_GROUND,
	0x6B => PICHU_THUNDER_JOLT_AIR,
	0x6C => GAME_AND_WATCH_PAN,
	0x6D => GAME_AND_WATCH_CHEF,
	0x6E => GAME_AND_WATCH_TURTLE,
	0x6F => GAME_AND_WATCH_FISH,
	0x70 => GAME_AND_WATCH_MANHOLE,
	0x71 => KIRBY_COPY_LASER,
	0x72 => KIRBY_COPY_FIREBALL,
	0x73 => KIRBY_COPY_NEEDLE,
	0x74 => KIRBY_COPY_BOMB,
	0x75 => KIRBY_COPY_TURNIP,
});

pseudo_enum!(TurnipFace: u8 {
	0 => SMILEY,
	1 => BORED,
	2 => SLEEPY,
	3 => SHOCKED,
	4 => LAUGHING,
	5 => WINK,
	6 => DOT_EYES,
	7 => STITCH_FACE,
});

pseudo_enum!(MissileType: u8 {
	0 => HOMING,
	1 => SUPER,
});
