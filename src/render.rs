//! Plain-text launch tiles for the CLI.

use crate::models::{Accumulated, Launch};
use crate::resolvers::{LocalResolvers, VirtualField};

const IN_CART: char = '●';
const NOT_IN_CART: char = '○';
const UNKNOWN: &str = "?";

/// Render one line per launch followed by a pagination footer.
///
/// Example output:
/// ```text
/// ● 109  Starlink-15 (v1.0)  Falcon 9  CCAFS SLC 40
/// ○ 108  Sentinel-6 Michael Freilich  Falcon 9  VAFB SLC 4E
/// 2 launches, more available
/// ```
pub fn render_tiles(list: &Accumulated<Launch>, resolvers: &LocalResolvers) -> String {
    let mut output = String::new();
    for launch in &list.items {
        render_tile(&mut output, launch, resolvers);
    }
    output.push_str(&footer(list));
    output.push('\n');
    output
}

fn render_tile(output: &mut String, launch: &Launch, resolvers: &LocalResolvers) {
    let in_cart = resolvers
        .resolve_launch_field(VirtualField::IsInCart, launch)
        .as_bool()
        .unwrap_or(false);

    output.push(if in_cart { IN_CART } else { NOT_IN_CART });
    output.push(' ');
    output.push_str(launch.id.as_str());
    for part in [
        launch.mission_name(),
        launch.rocket_name(),
        launch.site.as_deref(),
    ] {
        output.push_str("  ");
        output.push_str(part.unwrap_or(UNKNOWN));
    }
    output.push('\n');
}

fn footer(list: &Accumulated<Launch>) -> String {
    let noun = if list.len() == 1 { "launch" } else { "launches" };
    if list.has_more {
        format!("{} {}, more available", list.len(), noun)
    } else {
        format!("{} {}, end of list", list.len(), noun)
    }
}
