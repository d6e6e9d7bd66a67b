//! Administrator guard.
//!
//! Runs after the auth middleware and rejects non-admin users before any
//! back-office handler executes.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let admin = match depot.current_user_or_401() {
        Ok(user) => user.admin,
        Err(status_error) => {
            res.render(status_error);

            return;
        }
    };

    if !admin {
        res.render(StatusError::forbidden().brief("Administrator access required"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
