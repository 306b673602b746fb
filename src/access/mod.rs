//! Access-control core: roles, identities, the route guard and the route table.

pub mod guard;
pub mod identity;
pub mod login;
pub mod role;
pub mod routes;

pub use self::guard::{decide, AccessDecision, RouteRequirement};
pub use self::identity::Identity;
pub use self::login::{authenticate, LoginError};
pub use self::role::{role_home, Role, RoleDirectory, LOGIN_ROUTE};
pub use self::routes::{navigate, Navigation};
