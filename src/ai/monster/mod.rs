pub mod client;
pub mod txt2img;

pub use txt2img::MonsterImageClient;
