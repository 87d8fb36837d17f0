//! Step-size and index-adaptation tables shared by the encoder and decoder.

/// Number of entries in the 4-bit IMA step table
pub const STEP_4BIT_ENTRIES: usize = 89;

/// Number of entries in the 2-bit step table
pub const STEP_2BIT_ENTRIES: usize = 11;

/// IMA ADPCM index adjustment table, indexed by the full 4-bit code
pub const IDX_4BIT: [i8; 16] = [-1, -1, -1, -1, 2, 4, 6, 8, -1, -1, -1, -1, 2, 4, 6, 8];

/// Standard IMA ADPCM step-size table
#[rustfmt::skip]
pub const STEP_4BIT: [i32; STEP_4BIT_ENTRIES] = [
	7, 8, 9, 10, 11, 12, 13, 14, 16, 17,
	19, 21, 23, 25, 28, 31, 34, 37, 41, 45,
	50, 55, 60, 66, 73, 80, 88, 97, 107, 118,
	130, 143, 157, 173, 190, 209, 230, 253, 279, 307,
	337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
	876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
	2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358,
	5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
	15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

/// 2-bit index adjustment table, indexed by the full 2-bit code
pub const IDX_2BIT: [i8; 4] = [-1, 2, -1, 2];

/// 2-bit step-size table (`256 * {1, 2, 3, 5, 7, 11, 15, 23, 31, 63, 127}`)
pub const STEP_2BIT: [i32; STEP_2BIT_ENTRIES] =
	[256, 512, 768, 1280, 1792, 2816, 3840, 5888, 7936, 16128, 32512];
