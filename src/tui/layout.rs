//! Dashboard layout.
//!
//! Panels sit at fixed rows:
//!
//! ```text
//!  row 1   hostname up 3d 4h                              12:30:05
//!  row 2   Zero-OS version release-...
//!  row 3   This node contains 4 CPUs and 15 GB RAM
//!  row 5   System load: 0.15, 0.10, 0.05, CPU:   3%, RAM:  27% (4281 MB)
//!  row 7   Containers running: 0
//!  row 8   Virtual Machines running: 0
//!  row 10  System network: 3
//!  row 11  Internet: connected, Zerotier: ab12cd34, connected
//!  row 12+   eth0           : 52:54:00:a1:b2:c3, 10.20.30.40     [12.34 KB/s]
//! ```
//!
//! Every value of variable width is followed by a clear-to-end-of-line, so
//! painting over a previous frame leaves the same grid as painting on a
//! blank one.

use crate::model::{LinkState, Snapshot};

use super::fmt::{self, Field};
use super::style::StyleToken;
use super::surface::Surface;

const LEFT: u16 = 2;
const INTERFACE_COL: u16 = 4;
/// Distance of the clock from the right edge.
const CLOCK_OFFSET: u16 = 10;

const ROW_HOST: u16 = 1;
const ROW_PRODUCT: u16 = 2;
const ROW_HARDWARE: u16 = 3;
const ROW_USAGE: u16 = 5;
const ROW_CONTAINERS: u16 = 7;
const ROW_VMS: u16 = 8;
const ROW_NETWORK: u16 = 10;
const ROW_CONNECTIVITY: u16 = 11;
const ROW_FIRST_INTERFACE: u16 = 12;

/// Product name and release shown on the second row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub product: String,
    pub release: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            product: "Zero-OS".to_string(),
            release: "release-threefold-edge.nodes-0001 (1a2b3c4d)".to_string(),
        }
    }
}

/// Paints snapshots onto a surface.
///
/// Remembers how many interface rows the previous frame had so rows of
/// interfaces that disappeared are blanked.
#[derive(Debug, Default)]
pub struct Layout {
    branding: Branding,
    prev_interface_rows: usize,
}

impl Layout {
    pub fn new(branding: Branding) -> Self {
        Self {
            branding,
            prev_interface_rows: 0,
        }
    }

    /// Writes every panel for `snapshot`, then the frame border.
    pub fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S, snapshot: &Snapshot) {
        surface.reset();
        self.paint_summary(surface, snapshot);
        paint_usage(surface, snapshot);
        paint_workloads(surface, snapshot);
        self.paint_network(surface, snapshot);
        surface.draw_border();
    }

    fn paint_summary<S: Surface + ?Sized>(&self, surface: &mut S, snapshot: &Snapshot) {
        let (width, _) = surface.size();

        surface.move_to(ROW_HOST, LEFT);
        styled(surface, StyleToken::White, &snapshot.hostname);
        surface.write(" up ");
        styled(surface, StyleToken::Cyan, &fmt::format_uptime(snapshot.uptime));
        surface.clear_to_eol();

        surface.move_to(ROW_HOST, width.saturating_sub(CLOCK_OFFSET));
        styled(surface, StyleToken::Magenta, &fmt::clock(snapshot.time));
        surface.clear_to_eol();

        surface.move_to(ROW_PRODUCT, LEFT);
        styled(surface, StyleToken::Cyan, &self.branding.product);
        surface.write(" version ");
        styled(surface, StyleToken::Yellow, &self.branding.release);
        surface.clear_to_eol();

        surface.move_to(ROW_HARDWARE, LEFT);
        surface.write("This node contains ");
        styled(
            surface,
            StyleToken::Cyan,
            &format!("{} CPUs", snapshot.cpu.core_count()),
        );
        surface.write(" and ");
        styled(
            surface,
            StyleToken::Cyan,
            &format!("{} GB RAM", snapshot.memory.total_gb()),
        );
        surface.clear_to_eol();
    }

    fn paint_network<S: Surface + ?Sized>(&mut self, surface: &mut S, snapshot: &Snapshot) {
        let interfaces = &snapshot.interfaces;

        surface.move_to(ROW_NETWORK, LEFT);
        surface.write("System network: ");
        styled(
            surface,
            StyleToken::Cyan,
            &Field::Count.int(interfaces.len() as u64),
        );
        surface.clear_to_eol();

        surface.move_to(ROW_CONNECTIVITY, LEFT);
        surface.write("Internet: ");
        link_state(surface, snapshot.connectivity.internet);
        if let Some(overlay) = &snapshot.connectivity.overlay {
            surface.write(", Zerotier: ");
            styled(surface, StyleToken::Cyan, &overlay.network_id);
            surface.write(", ");
            link_state(surface, overlay.state);
        }
        surface.clear_to_eol();

        for (i, iface) in interfaces.iter().enumerate() {
            surface.move_to(interface_row(i), INTERFACE_COL);
            surface.write(&Field::InterfaceName.text(&iface.name));
            surface.write(": ");
            if let Some(mac) = &iface.hardware_address {
                surface.write(mac);
            }
            surface.write(", ");
            surface.write(&Field::IpAddress.text(&iface.ip_address));
            surface.write(&format!(" [{}]", fmt::throughput(iface)));
            surface.clear_to_eol();
        }

        for i in interfaces.len()..self.prev_interface_rows {
            surface.move_to(interface_row(i), 0);
            surface.clear_to_eol();
        }
        self.prev_interface_rows = interfaces.len();
    }
}

fn paint_usage<S: Surface + ?Sized>(surface: &mut S, snapshot: &Snapshot) {
    surface.move_to(ROW_USAGE, LEFT);
    surface.write("System load: ");
    for load in snapshot.load.as_array() {
        styled(surface, StyleToken::Blue, &Field::LoadAverage.float(load));
        surface.write(", ");
    }

    surface.write("CPU: ");
    styled(
        surface,
        StyleToken::Blue,
        &fmt::cpu_percent(snapshot.cpu.aggregate),
    );
    surface.write(", RAM: ");
    styled(surface, StyleToken::Blue, &fmt::ram_usage(&snapshot.memory));
    surface.clear_to_eol();
}

fn paint_workloads<S: Surface + ?Sized>(surface: &mut S, snapshot: &Snapshot) {
    let counts = [
        (ROW_CONTAINERS, "Containers running: ", snapshot.workloads.containers),
        (ROW_VMS, "Virtual Machines running: ", snapshot.workloads.virtual_machines),
    ];
    for (row, label, count) in counts {
        surface.move_to(row, LEFT);
        surface.write(label);
        styled(surface, StyleToken::Cyan, &Field::Count.int(count.into()));
        surface.clear_to_eol();
    }
}

fn link_state<S: Surface + ?Sized>(surface: &mut S, state: LinkState) {
    let token = match state {
        LinkState::Connected => StyleToken::Green,
        LinkState::Connecting | LinkState::Offline => StyleToken::Red,
    };
    styled(surface, token, state.label());
}

/// Writes `text` in `token`, then resets so surrounding labels stay plain.
fn styled<S: Surface + ?Sized>(surface: &mut S, token: StyleToken, text: &str) {
    surface.apply(token);
    surface.write(text);
    surface.reset();
}

fn interface_row(index: usize) -> u16 {
    u16::try_from(index)
        .ok()
        .and_then(|i| ROW_FIRST_INTERFACE.checked_add(i))
        .unwrap_or(u16::MAX)
}
