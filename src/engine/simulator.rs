//! Balance simulator for Drip Clicker.
//! Run with: cargo test simulate_ -- --nocapture

#[cfg(test)]
mod tests {
    use crate::engine::catalog::{Difficulty, UpgradeKey, UpgradeKind};
    use crate::engine::logic::format_number;
    use crate::engine::Session;

    /// Find the affordable purchase with the best payback. Generators are
    /// ranked by cost per drop-per-second; the bucket is estimated against
    /// a 5 clicks/sec play rate.
    fn find_best_purchase(session: &Session) -> Option<UpgradeKey> {
        let state = session.state();
        let mut best: Option<(f64, UpgradeKey)> = None;

        for u in &state.upgrades {
            if state.drops < u.current_cost {
                continue;
            }
            let gain_per_sec = match u.key.kind() {
                UpgradeKind::PassiveGenerator => u.current_increment,
                UpgradeKind::ClickBoost => u.current_increment * 5.0,
            };
            if gain_per_sec <= 0.0 {
                continue;
            }
            let payback = u.current_cost / gain_per_sec;
            let dominated = best.as_ref().map_or(false, |(bp, _)| *bp <= payback);
            if !dominated {
                best = Some((payback, u.key));
            }
        }

        best.map(|(_, key)| key)
    }

    fn report_stats(session: &Session, seconds: u32, purchases: u32) {
        let state = session.state();
        eprintln!("┌─── {}m{:02}s ───────────────────────", seconds / 60, seconds % 60);
        eprintln!(
            "│ Drops: {}  /sec: {}  /click: {}  Purchases: {}",
            format_number(state.drops),
            format_number(state.passive_income()),
            format_number(state.per_click),
            purchases
        );
        let counts: Vec<String> = state
            .upgrades
            .iter()
            .filter(|u| u.count > 0)
            .map(|u| format!("{}:{}", u.key.name(), u.count))
            .collect();
        eprintln!("│ Owned: {}", counts.join("  "));
        if !state.active_events.is_empty() {
            let names: Vec<&str> = state.active_events.iter().map(|e| e.kind.name()).collect();
            eprintln!("│ Active events: {}", names.join(", "));
        }
        if let Some(key) = find_best_purchase(session) {
            eprintln!(
                "│ Next buy: {} ({})",
                key.name(),
                format_number(session.state().upgrade(key).current_cost)
            );
        }
        eprintln!("└───────────────────────────────────");
    }

    /// Simulate `total_seconds` of play: 5 clicks/sec plus greedy
    /// best-payback purchases.
    fn simulate(difficulty: Difficulty, total_seconds: u32) {
        let mut session = Session::new(difficulty, 42);
        let mut purchases: u32 = 0;

        let report_times: Vec<u32> = vec![30, 60, 120, 300, 600, 1200, 1800];
        let mut next_report_idx = 0;

        eprintln!("\n=== Drip Clicker simulator: {} / {}min ===", difficulty.name(), total_seconds / 60);

        for second in 1..=total_seconds {
            for _ in 0..5 {
                session.register_click();
            }
            session.tick(10);

            // Greedy: keep buying the best payback until nothing is affordable
            for _ in 0..20 {
                match find_best_purchase(&session) {
                    Some(key) => {
                        if session.purchase(key) {
                            purchases += 1;
                        } else {
                            break;
                        }
                    }
                    None => break,
                }
            }

            if next_report_idx < report_times.len() && second >= report_times[next_report_idx] {
                report_stats(&session, second, purchases);
                next_report_idx += 1;
            }
        }

        eprintln!("\n=== final ===");
        report_stats(&session, total_seconds, purchases);

        // Sanity: scripted play must actually progress the economy.
        assert!(purchases > 0, "no purchases in {} seconds", total_seconds);
        assert!(session.state().passive_income() > 0.0);
        assert!(session.state().drops >= 0.0);
    }

    #[test]
    fn simulate_easy_30min() {
        simulate(Difficulty::Easy, 1800);
    }

    #[test]
    fn simulate_hard_30min() {
        simulate(Difficulty::Hard, 1800);
    }
}
