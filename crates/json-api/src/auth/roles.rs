//! Role guards. Mounted after the auth middleware.

use salvo::prelude::*;

use bookstore_app::domain::users::records::Role;

use crate::extensions::*;

/// Allow staff and admins.
#[salvo::handler]
pub(crate) async fn require_staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    guard(req, depot, res, ctrl, Role::is_staff).await;
}

/// Allow admins only.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    guard(req, depot, res, ctrl, |role| role == Role::Admin).await;
}

async fn guard(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
    allowed: impl Fn(Role) -> bool,
) {
    let identity = match depot.identity_or_401() {
        Ok(identity) => identity,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !allowed(identity.role) {
        res.render(StatusError::forbidden().brief("Insufficient role"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
