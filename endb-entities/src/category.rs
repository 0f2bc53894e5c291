use strum::{Display, EnumCount, EnumIter, EnumString};

/// Classification of a directory listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumCount, EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Coworking,
    Cafe,
    Accommodation,
    Restaurant,
    Activities,
}
