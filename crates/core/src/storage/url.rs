//! Download URL policy.
//!
//! Precedence:
//! 1. An injected [`RouteResolver`] that knows a route for the owner type
//! 2. The uploader's own default URL
//! 3. `{download_path_prefix}/{identifier}`

use crate::blob::OwnerRef;

use super::uploader::Uploader;

/// Host-application routing used to build owner-scoped URLs.
///
/// Implemented for any `Fn(&str, &OwnerRef) -> Option<String>`.
pub trait RouteResolver: Send + Sync {
    /// Path of the named route for `owner`, or `None` when the route does not exist.
    fn path_for(&self, route_name: &str, owner: &OwnerRef) -> Option<String>;
}

impl<F> RouteResolver for F
where
    F: Fn(&str, &OwnerRef) -> Option<String> + Send + Sync,
{
    fn path_for(&self, route_name: &str, owner: &OwnerRef) -> Option<String> {
        self(route_name, owner)
    }
}

/// Route name for an owner type: `BlogPost` becomes `blog_post_path`.
///
/// Namespaces (`Admin::BlogPost`) are dropped.
#[must_use]
pub fn route_name(type_name: &str) -> String {
    let base = type_name.rsplit("::").next().unwrap_or(type_name);
    format!("{}_path", snake_case(base))
}

fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
                || (prev.is_some_and(char::is_uppercase) && next.is_some_and(char::is_lowercase));
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c.is_alphanumeric() {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    out
}

/// Compute the download URL for `identifier`.
pub fn resolve_url<U>(
    resolver: Option<&dyn RouteResolver>,
    uploader: &U,
    download_path_prefix: &str,
    identifier: &str,
) -> String
where
    U: Uploader + ?Sized,
{
    if let Some(url) = resolver.and_then(|r| owner_url(r, uploader)) {
        return url;
    }

    if let Some(url) = uploader.default_url() {
        return url;
    }

    format!("{download_path_prefix}/{identifier}")
}

fn owner_url<U>(resolver: &dyn RouteResolver, uploader: &U) -> Option<String>
where
    U: Uploader + ?Sized,
{
    let owner = uploader.owner()?;
    let mounted_as = uploader.mounted_as()?;
    let path = resolver.path_for(&route_name(&owner.type_name), &owner)?;
    Some(format!("{path}/{mounted_as}"))
}
