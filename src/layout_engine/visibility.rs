use tracing::trace;

use crate::model::client::{ClientId, ClientList};
use crate::model::screen::ScreenId;
use crate::model::tag::TagRegistry;
use crate::sys::window_server::WindowServer;

/// Pre-layout pass: unban clients that should be visible on `screen` and
/// ban the rest of the screen's clients (newcomers included, so they never
/// flash stale geometry before the layout has run). Clients on other
/// screens are left alone. Ban/unban is idempotent; only actual state
/// changes reach the window server.
pub(crate) fn ban_pass(
    clients: &mut ClientList,
    server: &mut impl WindowServer,
    screen: ScreenId,
    tags: &TagRegistry,
) {
    clients.for_each_mut(|id, client| {
        if client.visible_on(screen, tags) && !client.newcomer {
            if client.banned {
                trace!(?id, %screen, "unban");
                client.banned = false;
                server.show_window(id);
            }
        } else if (client.screen == screen || client.newcomer) && !client.banned {
            trace!(?id, %screen, "ban");
            client.banned = true;
            server.hide_window(id);
        }
    });
}

/// Post-layout pass: newcomers that ended up visible get their flag
/// cleared and are shown. Returns them in client-list order so the caller
/// can apply the screen's focus-on-map policy.
pub(crate) fn reveal_newcomers(
    clients: &mut ClientList,
    server: &mut impl WindowServer,
    screen: ScreenId,
    tags: &TagRegistry,
) -> Vec<ClientId> {
    let mut revealed = Vec::new();
    clients.for_each_mut(|id, client| {
        if client.newcomer && client.visible_on(screen, tags) {
            trace!(?id, %screen, "revealing newcomer");
            client.newcomer = false;
            client.banned = false;
            server.show_window(id);
            revealed.push(id);
        }
    });
    revealed
}
