//! Stage ids, as they appear in the start record.

pseudo_enum!(Stage: u16 {
	2 => FOUNTAIN_OF_DREAMS,
	3 => POKEMON_STADIUM,
	4 => PRINCESS_PEACHS_CASTLE,
	5 => KONGO_JUNGLE,
	6 => BRINSTAR,
	7 => CORNERIA,
	8 => YOSHIS_STORY,
	9 => ONETT,
	10 => MUTE_CITY,
	11 => RAINBOW_CRUISE,
	12 => JUNGLE_JAPES,
	13 => GREAT_BAY,
	14 => HYRULE_TEMPLE,
	15 => BRINSTAR_DEPTHS,
	16 => YOSHIS_ISLAND,
	17 => GREEN_GREENS,
	18 => FOURSIDE,
	19 => MUSHROOM_KINGDOM_I,
	20 => MUSHROOM_KINGDOM_II,
	22 => VENOM,
	23 => POKE_FLOATS,
	24 => BIG_BLUE,
	25 => ICICLE_MOUNTAIN,
	26 => ICETOP,
	27 => FLAT_ZONE,
	28 => DREAM_LAND_N64,
	29 => YOSHIS_ISLAND_N64,
	30 => KONGO_JUNGLE_N64,
	31 => BATTLEFIELD,
	32 => FINAL_DESTINATION,
});
