use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::{debug, info};
use x11rb::connection::Connection;
use x11rb::errors::{ConnectionError, ReplyError};
use x11rb::protocol::randr::{self, ConnectionExt as RandrExt};
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

use crate::constants::x11;

/// Open X11 connection plus the bits of server state we query every poll
pub struct X11Context {
    pub conn: RustConnection,
    pub root: Window,
    pub atoms: CachedAtoms,
}

/// Pre-cached X11 atoms to avoid repeated roundtrips
pub struct CachedAtoms {
    pub edid: Atom,
}

impl CachedAtoms {
    pub fn new(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            edid: conn
                .intern_atom(false, x11::EDID_ATOM)
                .context("Failed to intern EDID atom")?
                .reply()
                .context("Failed to get reply for EDID atom")?
                .atom,
        })
    }
}

impl X11Context {
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X server")?;
        let root = conn.setup().roots[screen_num].root;

        let version = conn
            .randr_query_version(x11::RANDR_MAJOR, x11::RANDR_MINOR)
            .context("Failed to query RandR version")?
            .reply()
            .context("RandR extension not available")?;
        info!(
            screen = screen_num,
            randr = %format!("{}.{}", version.major_version, version.minor_version),
            "connected to x11"
        );

        let atoms = CachedAtoms::new(&conn)?;
        Ok(Self { conn, root, atoms })
    }

    /// Raw EDID bytes of every connected output, keyed by output name.
    /// Outputs that expose no EDID map to an empty vector.
    pub fn connected_edids(&self) -> Result<HashMap<String, Vec<u8>>> {
        let resources = self
            .conn
            .randr_get_screen_resources_current(self.root)
            .context("Failed to query RandR screen resources")?
            .reply()
            .context("Failed to get reply for RandR screen resources")?;

        let mut edids = HashMap::new();
        for output in resources.outputs {
            let info = self
                .conn
                .randr_get_output_info(output, resources.config_timestamp)
                .context(format!("Failed to query info for output {}", output))?
                .reply()
                .context(format!("Failed to get info reply for output {}", output))?;
            if info.connection != randr::Connection::CONNECTED {
                continue;
            }
            let name = String::from_utf8_lossy(&info.name).into_owned();
            let edid = self.output_edid(output)?;
            debug!(output = %name, bytes = edid.len(), "read EDID");
            edids.insert(name, edid);
        }
        Ok(edids)
    }

    fn output_edid(&self, output: randr::Output) -> Result<Vec<u8>> {
        let prop = self
            .conn
            .randr_get_output_property(output, self.atoms.edid, AtomEnum::ANY, 0, u32::MAX, false, false)
            .context(format!("Failed to query EDID property for output {}", output))?
            .reply()
            .context(format!("Failed to get EDID reply for output {}", output))?;
        Ok(if prop.format == x11::FORMAT_8 { prop.data } else { Vec::new() })
    }
}

/// Whether `err` was caused by the X connection itself failing, as opposed
/// to a single request being rejected
pub fn is_connection_lost(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.downcast_ref::<ConnectionError>().is_some()
            || matches!(cause.downcast_ref::<ReplyError>(), Some(ReplyError::ConnectionError(_)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_detected_through_context() {
        let err = Err::<(), _>(ConnectionError::UnknownError)
            .context("Failed to query RandR screen resources")
            .unwrap_err();
        assert!(is_connection_lost(&err));

        let err = Err::<(), _>(ReplyError::ConnectionError(ConnectionError::UnknownError))
            .context("Failed to get EDID reply for output 66")
            .unwrap_err();
        assert!(is_connection_lost(&err));
    }

    #[test]
    fn test_other_errors_are_not_connection_loss() {
        assert!(!is_connection_lost(&anyhow::anyhow!("`xrandr` exited with exit status: 1")));
    }
}
