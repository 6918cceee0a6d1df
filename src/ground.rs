//! Ground-id tables keyed by stage. Raw ground ids are stage-local collision
//! surface indices; `get_ground` names them and merges the per-slant and
//! per-edge surfaces of a stage's floor into `MainStage`.

use serde::Serialize;

use super::stage::Stage;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Ground {
	MainStage,
	Randall,
	LeftPlatform,
	RightPlatform,
	TopPlatform,
	Unknown(u16),
}

impl Ground {
	pub fn name(&self) -> String {
		match self {
			Ground::MainStage => "MAIN_STAGE".to_string(),
			Ground::Randall => "RANDALL".to_string(),
			Ground::LeftPlatform => "LEFT_PLATFORM".to_string(),
			Ground::RightPlatform => "RIGHT_PLATFORM".to_string(),
			Ground::TopPlatform => "TOP_PLATFORM".to_string(),
			Ground::Unknown(id) => format!("GROUND_{}", id),
		}
	}
}

/// Names a ground id on a given stage. The slanted floor sections of Yoshi's
/// and the multi-part floors of Stadium / Fountain / Battlefield / Dreamland
/// all report as `MainStage`, matching how edgeguard analysis wants them.
pub fn get_ground(stage: Stage, ground_id: u16) -> Ground {
	match stage {
		Stage::YOSHIS_STORY => match ground_id {
			0 => Ground::Randall,
			1 => Ground::LeftPlatform,
			2 | 3 | 6 => Ground::MainStage,
			4 => Ground::TopPlatform,
			5 => Ground::RightPlatform,
			id => Ground::Unknown(id),
		},
		Stage::BATTLEFIELD => match ground_id {
			0 | 1 | 5 => Ground::MainStage,
			2 => Ground::LeftPlatform,
			3 => Ground::TopPlatform,
			4 => Ground::RightPlatform,
			id => Ground::Unknown(id),
		},
		Stage::DREAM_LAND_N64 => match ground_id {
			0 => Ground::LeftPlatform,
			1 => Ground::RightPlatform,
			2 => Ground::TopPlatform,
			3 | 4 | 5 => Ground::MainStage,
			id => Ground::Unknown(id),
		},
		Stage::POKEMON_STADIUM => match ground_id {
			34 | 51 | 52 | 53 | 54 => Ground::MainStage,
			35 => Ground::LeftPlatform,
			36 => Ground::RightPlatform,
			id => Ground::Unknown(id),
		},
		Stage::FOUNTAIN_OF_DREAMS => match ground_id {
			0 => Ground::LeftPlatform,
			1 => Ground::RightPlatform,
			2 => Ground::TopPlatform,
			3 | 4 | 5 | 6 | 7 => Ground::MainStage,
			id => Ground::Unknown(id),
		},
		Stage::FINAL_DESTINATION => Ground::MainStage,
		_ => Ground::Unknown(ground_id),
	}
}
