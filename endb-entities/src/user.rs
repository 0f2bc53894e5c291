use num_derive::{FromPrimitive, ToPrimitive};
use strum::{Display, EnumString};

use crate::{email::EmailAddress, password::Password};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email           : EmailAddress,
    pub email_confirmed : bool,
    pub password        : Password,
    pub role            : Role,
    pub plan            : SubscriptionPlan,
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    Guest = 0,
    User  = 1,
    Admin = 2,
}

/// Subscription tier of a user account.
///
/// Creating listings requires the premium plan.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SubscriptionPlan {
    #[default]
    Free    = 0,
    Premium = 1,
}
