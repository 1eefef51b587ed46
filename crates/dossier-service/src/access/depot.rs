//! Depot helpers for passing access state between Salvo handlers.

use std::sync::Arc;

use salvo::async_trait;

use crate::error::{ServiceError, ServiceResult};

use super::{AccessContext, AccessResolver, Permission};

pub mod depot_keys {
    pub const ACCESS_CONTEXT: &str = "__dossier_access_context";
}

/// Injects a shared [`AccessResolver`] into every request's depot.
pub struct AccessResolverHandler {
    pub resolver: Arc<AccessResolver>,
}

#[async_trait]
impl salvo::Handler for AccessResolverHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.resolver.clone());
    }
}

/// ## Summary
/// Retrieves the access resolver from the depot.
///
/// ## Errors
/// Returns an error if no resolver was injected.
pub fn get_resolver_from_depot(depot: &salvo::Depot) -> ServiceResult<Arc<AccessResolver>> {
    depot
        .obtain::<Arc<AccessResolver>>()
        .cloned()
        .map_err(|_err| ServiceError::InvariantViolation("Access resolver not found in depot"))
}

pub fn insert_access_context(depot: &mut salvo::Depot, ctx: AccessContext) {
    depot.insert(depot_keys::ACCESS_CONTEXT, ctx);
}

/// ## Summary
/// Retrieves the access context resolved for this request.
///
/// ## Errors
/// Returns an error if the access middleware did not run.
pub fn get_access_context_from_depot(depot: &salvo::Depot) -> ServiceResult<&AccessContext> {
    depot
        .get::<AccessContext>(depot_keys::ACCESS_CONTEXT)
        .map_err(|_err| ServiceError::InvariantViolation("Access context not found in depot"))
}

/// ## Summary
/// Retrieves the access context and checks that it holds `permission`.
///
/// ## Errors
/// Returns `MissingPermission` if the context lacks `permission`, or an
/// invariant violation if no context was resolved.
pub fn require_permission_from_depot(
    depot: &salvo::Depot,
    permission: Permission,
) -> ServiceResult<&AccessContext> {
    let ctx = get_access_context_from_depot(depot)?;
    ctx.require_permission(permission)?;
    Ok(ctx)
}
