//! Action states: the game engine's integer identifier for a character's
//! current animation/behavior. States 0..=340 are shared by the whole cast;
//! higher values are character-specific and pass through undecoded.

pub type StateId = u16;

// Range bounds used by the stat predicates. Bounds are inclusive on both
// ends except where a predicate says otherwise.
pub const DAMAGE_START: ActionState = ActionState(75);
pub const DAMAGE_END: ActionState = ActionState(91);
pub const CAPTURE_START: ActionState = ActionState(223);
pub const CAPTURE_END: ActionState = ActionState(232);
pub const GUARD_START: ActionState = ActionState(178);
pub const GUARD_END: ActionState = ActionState(182);
pub const GUARD_BREAK_START: ActionState = ActionState(205);
pub const GUARD_BREAK_END: ActionState = ActionState(211);
pub const GROUNDED_CONTROL_START: ActionState = ActionState(14);
pub const GROUNDED_CONTROL_END: ActionState = ActionState(24);
pub const LEDGE_ACTION_START: ActionState = ActionState(252);
pub const LEDGE_ACTION_END: ActionState = ActionState(263);
pub const SQUAT_START: ActionState = ActionState(39);
pub const SQUAT_END: ActionState = ActionState(41);
pub const DOWN_START: ActionState = ActionState(183);
pub const DOWN_END: ActionState = ActionState(198);
pub const TECH_START: ActionState = ActionState(199);
pub const TECH_END: ActionState = ActionState(204);
pub const DODGE_START: ActionState = ActionState(233);
pub const DODGE_END: ActionState = ActionState(236);
pub const DYING_START: ActionState = ActionState(0);
pub const DYING_END: ActionState = ActionState(10);
pub const CONTROLLED_JUMP_START: ActionState = ActionState(24);
pub const CONTROLLED_JUMP_END: ActionState = ActionState(34);
pub const GROUND_ATTACK_START: ActionState = ActionState(44);
pub const GROUND_ATTACK_END: ActionState = ActionState(64);
pub const AERIAL_ATTACK_START: ActionState = ActionState(65);
pub const AERIAL_ATTACK_END: ActionState = ActionState(74);
pub const AERIAL_LAND_LAG_START: ActionState = ActionState(70);
pub const AERIAL_LAND_LAG_END: ActionState = ActionState(74);
pub const FALL_SPECIAL_START: ActionState = ActionState(35);
pub const FALL_SPECIAL_END: ActionState = ActionState(37);
pub const COMMAND_GRAB_RANGE1_START: ActionState = ActionState(266);
pub const COMMAND_GRAB_RANGE1_END: ActionState = ActionState(304);
pub const COMMAND_GRAB_RANGE2_START: ActionState = ActionState(327);
pub const COMMAND_GRAB_RANGE2_END: ActionState = ActionState(338);

/// Last state shared by the whole cast; everything above is
/// character-specific.
pub const COMMON_END: ActionState = ActionState(340);

pseudo_enum!(ActionState: u16 {
	0 => DEAD_DOWN,
	1 => DEAD_LEFT,
	2 => DEAD_RIGHT,
	3 => DEAD_UP,
	4 => DEAD_UP_STAR,
	5 => DEAD_UP_STAR_ICE,
	6 => DEAD_UP_FALL,
	7 => DEAD_UP_FALL_HIT_CAMERA,
	8 => DEAD_UP_FALL_HIT_CAMERA_FLAT,
	9 => DEAD_UP_FALL_ICE,
	10 => DEAD_UP_FALL_HIT_CAMERA_ICE,
	11 => SLEEP,
	12 => REBIRTH,
	13 => REBIRTH_WAIT,
	14 => WAIT,
	15 => WALK_SLOW,
	16 => WALK_MIDDLE,
	17 => WALK_FAST,
	18 => TURN,
	19 => TURN_RUN,
	20 => DASH,
	21 => RUN,
	22 => RUN_DIRECT,
	23 => RUN_BRAKE,
	24 => KNEE_BEND,
	25 => JUMP_F,
	26 => JUMP_B,
	27 => JUMP_AERIAL_F,
	28 => JUMP_AERIAL_B,
	29 => FALL,
	30 => FALL_F,
	31 => FALL_B,
	32 => FALL_AERIAL,
	33 => FALL_AERIAL_F,
	34 => FALL_AERIAL_B,
	35 => FALL_SPECIAL,
	36 => FALL_SPECIAL_F,
	37 => FALL_SPECIAL_B,
	38 => DAMAGE_FALL,
	39 => SQUAT,
	40 => SQUAT_WAIT,
	41 => SQUAT_RV,
	42 => LAND,
	43 => LAND_FALL_SPECIAL,
	44 => ATTACK_11,
	45 => ATTACK_12,
	46 => ATTACK_13,
	47 => ATTACK_100_START,
	48 => ATTACK_100_LOOP,
	49 => ATTACK_100_END,
	50 => ATTACK_DASH,
	51 => ATTACK_S_3_HI,
	52 => ATTACK_S_3_HI_S,
	53 => ATTACK_S_3_S,
	54 => ATTACK_S_3_LW_S,
	55 => ATTACK_S_3_LW,
	56 => ATTACK_HI_3,
	57 => ATTACK_LW_3,
	58 => ATTACK_S_4_HI,
	59 => ATTACK_S_4_HI_S,
	60 => ATTACK_S_4_S,
	61 => ATTACK_S_4_LW_S,
	62 => ATTACK_S_4_LW,
	63 => ATTACK_HI_4,
	64 => ATTACK_LW_4,
	65 => ATTACK_AIR_N,
	66 => ATTACK_AIR_F,
	67 => ATTACK_AIR_B,
	68 => ATTACK_AIR_HI,
	69 => ATTACK_AIR_LW,
	70 => LANDING_AIR_N,
	71 => LANDING_AIR_F,
	72 => LANDING_AIR_B,
	73 => LANDING_AIR_HI,
	74 => LANDING_AIR_LW,
	75 => DAMAGE_HI_1,
	76 => DAMAGE_HI_2,
	77 => DAMAGE_HI_3,
	78 => DAMAGE_N_1,
	79 => DAMAGE_N_2,
	80 => DAMAGE_N_3,
	81 => DAMAGE_LW_1,
	82 => DAMAGE_LW_2,
	83 => DAMAGE_LW_3,
	84 => DAMAGE_AIR_1,
	85 => DAMAGE_AIR_2,
	86 => DAMAGE_AIR_3,
	87 => DAMAGE_FLY_HI,
	88 => DAMAGE_FLY_N,
	89 => DAMAGE_FLY_LW,
	90 => DAMAGE_FLY_TOP,
	91 => DAMAGE_FLY_ROLL,
	92 => LIGHT_GET,
	93 => HEAVY_GET,
	94 => LIGHT_THROW_F,
	95 => LIGHT_THROW_B,
	96 => LIGHT_THROW_HI,
	97 => LIGHT_THROW_LW,
	98 => LIGHT_THROW_DASH,
	99 => LIGHT_THROW_DROP,
	100 => LIGHT_THROW_AIR_F,
	101 => LIGHT_THROW_AIR_B,
	102 => LIGHT_THROW_AIR_HI,
	103 => LIGHT_THROW_AIR_LW,
	104 => HEAVY_THROW_F,
	105 => HEAVY_THROW_B,
	106 => HEAVY_THROW_HI,
	107 => HEAVY_THROW_LW,
	108 => LIGHT_THROW_F_4,
	109 => LIGHT_THROW_B_4,
	110 => LIGHT_THROW_HI_4,
	111 => LIGHT_THROW_LW_4,
	112 => LIGHT_THROW_AIR_F_4,
	113 => LIGHT_THROW_AIR_B_4,
	114 => LIGHT_THROW_AIR_HI_4,
	115 => LIGHT_THROW_AIR_LW_4,
	116 => HEAVY_THROW_F_4,
	117 => HEAVY_THROW_B_4,
	118 => HEAVY_THROW_HI_4,
	119 => HEAVY_THROW_LW_4,
	120 => SWORD_SWING_1,
	121 => SWORD_SWING_3,
	122 => SWORD_SWING_4,
	123 => SWORD_SWING_DASH,
	124 => BAT_SWING_1,
	125 => BAT_SWING_3,
	126 => BAT_SWING_4,
	127 => BAT_SWING_DASH,
	128 => PARASOL_SWING_1,
	129 => PARASOL_SWING_3,
	130 => PARASOL_SWING_4,
	131 => PARASOL_SWING_DASH,
	132 => HARISEN_SWING_1,
	133 => HARISEN_SWING_3,
	134 => HARISEN_SWING_4,
	135 => HARISEN_SWING_DASH,
	136 => STAR_ROD_SWING_1,
	137 => STAR_ROD_SWING_3,
	138 => STAR_ROD_SWING_4,
	139 => STAR_ROD_SWING_DASH,
	140 => LIP_STICK_SWING_1,
	141 => LIP_STICK_SWING_3,
	142 => LIP_STICK_SWING_4,
	143 => LIP_STICK_SWING_DASH,
	144 => ITEM_PARASOL_OPEN,
	145 => ITEM_PARASOL_FALL,
	146 => ITEM_PARASOL_FALL_SPECIAL,
	147 => ITEM_PARASOL_DAMAGE_FALL,
	148 => L_GUN_SHOOT,
	149 => L_GUN_SHOOT_AIR,
	150 => L_GUN_SHOOT_EMPTY,
	151 => L_GUN_SHOOT_AIR_EMPTY,
	152 => FIRE_FLOWER_SHOOT,
	153 => FIRE_FLOWER_SHOOT_AIR,
	154 => ITEM_SCREW,
	155 => ITEM_SCREW_AIR,
	156 => DAMAGE_SCREW,
	157 => DAMAGE_SCREW_AIR,
	158 => ITEM_SCOPE_START,
	159 => ITEM_SCOPE_RAPID,
	160 => ITEM_SCOPE_FIRE,
	161 => ITEM_SCOPE_END,
	162 => ITEM_SCOPE_AIR_START,
	163 => ITEM_SCOPE_AIR_RAPID,
	164 => ITEM_SCOPE_AIR_FIRE,
	165 => ITEM_SCOPE_AIR_END,
	166 => ITEM_SCOPE_START_EMPTY,
	167 => ITEM_SCOPE_RAPID_EMPTY,
	168 => ITEM_SCOPE_FIRE_EMPTY,
	169 => ITEM_SCOPE_END_EMPTY,
	170 => ITEM_SCOPE_AIR_START_EMPTY,
	171 => ITEM_SCOPE_AIR_RAPID_EMPTY,
	172 => ITEM_SCOPE_AIR_FIRE_EMPTY,
	173 => ITEM_SCOPE_AIR_END_EMPTY,
	174 => LIFT_WAIT,
	175 => LIFT_WALK_1,
	176 => LIFT_WALK_2,
	177 => LIFT_TURN,
	178 => GUARD_ON,
	179 => GUARD,
	180 => GUARD_OFF,
	181 => GUARD_SET_OFF,
	182 => GUARD_REFLECT,
	183 => DOWN_BOUND_U,
	184 => DOWN_WAIT_U,
	185 => DOWN_DAMAGE_U,
	186 => DOWN_STAND_U,
	187 => DOWN_ATTACK_U,
	188 => DOWN_FOWARD_U,
	189 => DOWN_BACK_U,
	190 => DOWN_SPOT_U,
	191 => DOWN_BOUND_D,
	192 => DOWN_WAIT_D,
	193 => DOWN_DAMAGE_D,
	194 => DOWN_STAND_D,
	195 => DOWN_ATTACK_D,
	196 => DOWN_FOWARD_D,
	197 => DOWN_BACK_D,
	198 => DOWN_SPOT_D,
	199 => PASSIVE,
	200 => PASSIVE_STAND_F,
	201 => PASSIVE_STAND_B,
	202 => PASSIVE_WALL,
	203 => PASSIVE_WALL_JUMP,
	204 => PASSIVE_CEIL,
	205 => SHIELD_BREAK_FLY,
	206 => SHIELD_BREAK_FALL,
	207 => SHIELD_BREAK_DOWN_U,
	208 => SHIELD_BREAK_DOWN_D,
	209 => SHIELD_BREAK_STAND_U,
	210 => SHIELD_BREAK_STAND_D,
	211 => FURA_FURA,
	212 => CATCH,
	213 => CATCH_PULL,
	214 => CATCH_DASH,
	215 => CATCH_DASH_PULL,
	216 => CATCH_WAIT,
	217 => CATCH_ATTACK,
	218 => CATCH_CUT,
	219 => THROW_F,
	220 => THROW_B,
	221 => THROW_HI,
	222 => THROW_LW,
	223 => CAPTURE_PULLED_HI,
	224 => CAPTURE_WAIT_HI,
	225 => CAPTURE_DAMAGE_HI,
	226 => CAPTURE_PULLED_LW,
	227 => CAPTURE_WAIT_LW,
	228 => CAPTURE_DAMAGE_LW,
	229 => CAPTURE_CUT,
	230 => CAPTURE_JUMP,
	231 => CAPTURE_NECK,
	232 => CAPTURE_FOOT,
	233 => ESCAPE_F,
	234 => ESCAPE_B,
	235 => ESCAPE,
	236 => ESCAPE_AIR,
	237 => REBOUND_STOP,
	238 => REBOUND,
	239 => THROWN_F,
	240 => THROWN_B,
	241 => THROWN_HI,
	242 => THROWN_LW,
	243 => THROWN_LW_WOMEN,
	244 => PASS,
	245 => OTTOTTO,
	246 => OTTOTTO_WAIT,
	247 => FLY_REFLECT_WALL,
	248 => FLY_REFLECT_CEIL,
	249 => STOP_WALL,
	250 => STOP_CEIL,
	251 => MISS_FOOT,
	252 => CLIFF_CATCH,
	253 => CLIFF_WAIT,
	254 => CLIFF_CLIMB_SLOW,
	255 => CLIFF_CLIMB_QUICK,
	256 => CLIFF_ATTACK_SLOW,
	257 => CLIFF_ATTACK_QUICK,
	258 => CLIFF_ESCAPE_SLOW,
	259 => CLIFF_ESCAPE_QUICK,
	260 => CLIFF_JUMP_SLOW_1,
	261 => CLIFF_JUMP_SLOW_2,
	262 => CLIFF_JUMP_QUICK_1,
	263 => CLIFF_JUMP_QUICK_2,
	264 => APPEAL_R,
	265 => APPEAL_L,
	266 => SHOULDERED_WAIT,
	267 => SHOULDERED_WALK_SLOW,
	268 => SHOULDERED_WALK_MIDDLE,
	269 => SHOULDERED_WALK_FAST,
	270 => SHOULDERED_TURN,
	271 => THROWN_F_F,
	272 => THROWN_F_B,
	273 => THROWN_F_HI,
	274 => THROWN_F_LW,
	275 => CAPTURE_CAPTAIN,
	276 => CAPTURE_YOSHI,
	277 => YOSHI_EGG,
	278 => CAPTURE_KOOPA,
	279 => CAPTURE_DAMAGE_KOOPA,
	280 => CAPTURE_WAIT_KOOPA,
	281 => THROWN_KOOPA_F,
	282 => THROWN_KOOPA_B,
	283 => CAPTURE_KOOPA_AIR,
	284 => CAPTURE_DAMAGE_KOOPA_AIR,
	285 => CAPTURE_WAIT_KOOPA_AIR,
	286 => THROWN_KOOPA_AIR_F,
	287 => THROWN_KOOPA_AIR_B,
	288 => CAPTURE_KIRBY,
	289 => CAPTURE_WAIT_KIRBY,
	290 => THROWN_KIRBY_STAR,
	291 => THROWN_COPY_STAR,
	292 => THROWN_KIRBY,
	293 => BARREL_WAIT,
	294 => BURY,
	295 => BURY_WAIT,
	296 => BURY_JUMP,
	297 => DAMAGE_SONG,
	298 => DAMAGE_SONG_WAIT,
	299 => DAMAGE_SONG_RV,
	300 => DAMAGE_BIND,
	301 => CAPTURE_MEWTWO,
	302 => CAPTURE_MEWTWO_AIR,
	303 => THROWN_MEWTWO,
	304 => THROWN_MEWTWO_AIR,
	305 => WARP_STAR_JUMP,
	306 => WARP_STAR_FALL,
	307 => HAMMER_WAIT,
	308 => HAMMER_WALK,
	309 => HAMMER_TURN,
	310 => HAMMER_KNEE_BEND,
	311 => HAMMER_FALL,
	312 => HAMMER_JUMP,
	313 => HAMMER_LANDING,
	314 => KINOKO_GIANT_START,
	315 => KINOKO_GIANT_START_AIR,
	316 => KINOKO_GIANT_END,
	317 => KINOKO_GIANT_END_AIR,
	318 => KINOKO_SMALL_START,
	319 => KINOKO_SMALL_START_AIR,
	320 => KINOKO_SMALL_END,
	321 => KINOKO_SMALL_END_AIR,
	322 => ENTRY,
	323 => ENTRY_START,
	324 => ENTRY_END,
	325 => DAMAGE_ICE,
	326 => DAMAGE_ICE_JUMP,
	327 => CAPTURE_MASTER_HAND,
	328 => CAPTURE_DAMAGE_MASTER_HAND,
	329 => CAPTURE_WAIT_MASTER_HAND,
	330 => THROWN_MASTER_HAND,
	331 => CAPTURE_KIRBY_YOSHI,
	332 => KIRBY_YOSHI_EGG,
	333 => CAPTURE_REDEAD,
	334 => CAPTURE_LIKE_LIKE,
	335 => DOWN_REFLECT,
	336 => CAPTURE_CRAZY_HAND,
	337 => CAPTURE_DAMAGE_CRAZY_HAND,
	338 => CAPTURE_WAIT_CRAZY_HAND,
	339 => THROWN_CRAZY_HAND,
	340 => BARREL_CANNON_WAIT,
});

impl ActionState {
	/// True for states shared by the whole cast, as opposed to
	/// character-specific states.
	pub fn is_common(self) -> bool {
		self <= COMMON_END
	}
}

/// Which blast zone a death animation corresponds to.
pub fn death_direction(state: ActionState) -> Option<&'static str> {
	match state.0 {
		0 => Some("Bottom"),
		1 => Some("Left"),
		2 => Some("Right"),
		3..=10 => Some("Top"),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_states_have_names() {
		assert_eq!(ActionState::DASH.name(), Some("DASH"));
		assert_eq!(ActionState(20), ActionState::DASH);
		assert_eq!(format!("{:?}", ActionState::KNEE_BEND), "24:KNEE_BEND");
	}

	#[test]
	fn unknown_states_are_preserved() {
		let s = ActionState::new(350);
		assert_eq!(s.0, 350);
		assert_eq!(s.name(), None);
		assert!(!s.is_common());
	}

	#[test]
	fn ranges_are_ordered() {
		assert!(DAMAGE_START <= ActionState::DAMAGE_FLY_ROLL);
		assert!(ActionState::DAMAGE_FLY_ROLL <= DAMAGE_END);
		assert!(TECH_START <= ActionState::PASSIVE_WALL);
	}
}
