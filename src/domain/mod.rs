pub mod cart;
pub mod chat;
pub mod order;
pub mod restaurant;
pub mod review;
pub mod status;

pub use cart::*;
pub use chat::*;
pub use order::*;
pub use restaurant::*;
pub use review::*;
