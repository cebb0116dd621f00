//! Registration names derived from Rust type names.

use heck::ToSnakeCase;

/// Derives a registration name from `T`'s identifier: `MyService` → `my_service`.
///
/// Only the last path segment is used and generic arguments are ignored, so
/// `app::db::Pool<Postgres>` becomes `pool`. No collision detection is done here;
/// the registry's uniqueness check is the only guard.
pub fn injectable_name_of<T: ?Sized>() -> String {
    snake_case_name(type_ident(std::any::type_name::<T>()))
}

/// Converts an UpperCamelCase identifier to lower_snake_case.
pub fn snake_case_name(ident: &str) -> String {
    ident.to_snake_case()
}

fn type_ident(type_name: &str) -> &str {
    let path = type_name.split('<').next().unwrap_or(type_name);
    path.rsplit("::").next().unwrap_or(path)
}
