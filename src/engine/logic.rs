//! Click, purchase, and income accumulation — pure functions over
//! [`EconomyState`], fully testable without timers or rendering.

use super::catalog::{UpgradeKey, UpgradeKind};
use super::state::{EconomyState, Particle};

/// Manual click: add the per-click gain and spawn a "+N" particle.
pub fn click(state: &mut EconomyState) {
    let gain = state.per_click;
    state.drops += gain;
    state.total_clicks += 1;
    state.click_flash = 3;

    let col_offset = state.roll(13) as i16 - 6; // -6..+6
    let life = 8 + state.roll(5) as u32; // 8-12 ticks
    state.particles.push(Particle {
        text: format!("+{}", format_number(gain)),
        col_offset,
        life,
        max_life: life,
    });
    if state.particles.len() > 20 {
        state.particles.remove(0);
    }
}

/// Try to buy one unit of `key`. Insufficient funds is a silent no-op.
///
/// On success the next-unit cost is rebuilt from the catalog base cost:
/// `ceil(base_cost × cost_scale^count)`. The difficulty multiplier and any
/// in-flight cost event are intentionally not re-applied here; a running
/// cost event still divides this value back when it reverts.
pub fn purchase(state: &mut EconomyState, key: UpgradeKey) -> bool {
    let cost = state.upgrade(key).current_cost;
    if state.drops < cost {
        return false;
    }

    state.drops -= cost;
    let instance = state.upgrade_mut(key);
    instance.count += 1;
    let count = instance.count;
    instance.current_cost = (key.base_cost() * key.cost_scale().powi(count as i32)).ceil();

    if key.kind() == UpgradeKind::ClickBoost {
        state.per_click += state.upgrade(key).current_increment;
    }

    state.add_log(&format!("Bought {} (owned: {})", key.name(), count), false);
    true
}

/// One income grant: the full passive income for a 1-second period.
/// Returns the amount added (0 when nothing is owned).
pub fn grant_income(state: &mut EconomyState) -> f64 {
    let passive = state.passive_income();
    if passive > 0.0 {
        state.drops += passive;
    }
    passive
}

/// Format a drop count with thousands separators, keeping one decimal
/// when event multipliers have left a visible fraction.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let int_part = n.floor() as u64;
    let frac = n - int_part as f64;

    let s = int_part.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let result: String = result.chars().rev().collect();

    if frac > 0.05 {
        format!("{}.{}", result, (frac * 10.0).round() as u8)
    } else {
        result
    }
}
