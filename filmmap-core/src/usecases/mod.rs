mod locate_films;

pub use self::locate_films::*;

mod prelude {
    pub use crate::{entities::*, Error};
    pub type Result<T> = std::result::Result<T, Error>;
}
