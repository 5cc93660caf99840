//! Command dispatch to the host surface.
//!
//! Dispatch is optimistic. The host gives no reliable failure signal, so a
//! rejected or ignored command is logged and otherwise treated like success.
//! Whatever actually happened shows up in the next tracker refresh.

use crate::capability::Command;
use crate::platform::EditSurface;

/// Issue `command` to the surface and return focus to it.
pub fn dispatch_command<S: EditSurface + ?Sized>(surface: &mut S, command: &Command) {
    let capability = command.capability;
    match surface.exec_command(capability, command.argument()) {
        Ok(true) => {
            tracing::trace!(target: "newsdesk::dispatch", %capability, "command applied");
        }
        Ok(false) => {
            tracing::debug!(target: "newsdesk::dispatch", %capability, "host ignored command");
        }
        Err(e) => {
            tracing::debug!(target: "newsdesk::dispatch", %capability, error = %e, "host rejected command");
        }
    }

    // Keep keyboard input flowing into the surface after a toolbar click.
    surface.focus();
}
