//! Erlang C queueing model.
//!
//! This module computes, for a stationary M/M/c queue, the probability that
//! an arriving contact waits longer than a target answer time.
//!
//! The Erlang C probability is evaluated through the Erlang B recurrence
//!
//! ```text
//! B(0) = 1
//! B(n) = A·B(n-1) / (n + A·B(n-1))
//! C(c, A) = c·B(c) / (c - A·(1 - B(c)))
//! ```
//!
//! which is algebraically identical to the classical
//! `(A^c / (c! (1 - ρ))) / (Σ A^n/n! + A^c / (c! (1 - ρ)))` form but never
//! materialises `A^c` or `c!`, so it stays finite for large agent counts.

/// Probability that an arriving contact has to wait at all.
///
/// Returns `1.0` when `agents <= 0` or `traffic_intensity >= agents`
/// (the queue is unstable and every contact waits).
///
/// # Examples
///
/// ```
/// use erlang_staffing::calculation::erlang_c_probability;
///
/// // Classic textbook value: 2 Erlangs on 3 agents waits with probability 4/9.
/// let p = erlang_c_probability(2.0, 3);
/// assert!((p - 4.0 / 9.0).abs() < 1e-12);
///
/// assert_eq!(erlang_c_probability(5.0, 5), 1.0);
/// ```
pub fn erlang_c_probability(traffic_intensity: f64, agents: i64) -> f64 {
    if agents <= 0 || traffic_intensity >= agents as f64 {
        return 1.0;
    }

    let mut erlang_b = 1.0;
    for n in 1..=agents {
        let offered = traffic_intensity * erlang_b;
        erlang_b = offered / (n as f64 + offered);
    }

    let servers = agents as f64;
    servers * erlang_b / (servers - traffic_intensity * (1.0 - erlang_b))
}

/// Probability that a contact waits longer than `target_answer_time`.
///
/// This is the Erlang C probability scaled by the exponential tail of the
/// wait distribution:
///
/// ```text
/// P(wait > t) = C(c, A) · exp(-(c - A) · t / AHT)
/// ```
///
/// # Arguments
///
/// * `traffic_intensity` - Offered load in Erlangs
/// * `agents` - Number of agents; zero or negative counts are allowed
/// * `target_answer_time` - Target answer time in seconds
/// * `average_handle_time` - Average handle time in seconds
///
/// # Returns
///
/// Exactly `1.0` when `agents <= 0` or `traffic_intensity >= agents`,
/// regardless of the other inputs. Otherwise a value in `[0, 1]`.
/// Non-finite inputs are not special-cased and propagate as NaN.
///
/// # Examples
///
/// ```
/// use erlang_staffing::calculation::wait_probability;
///
/// let p = wait_probability(20.0, 25, 30.0, 360.0);
/// assert!((p - 0.137849).abs() < 1e-6);
///
/// // No offered load, nobody waits.
/// assert_eq!(wait_probability(0.0, 3, 30.0, 360.0), 0.0);
///
/// // Unstable system, everybody waits.
/// assert_eq!(wait_probability(20.0, 20, 30.0, 360.0), 1.0);
/// ```
pub fn wait_probability(
    traffic_intensity: f64,
    agents: i64,
    target_answer_time: f64,
    average_handle_time: f64,
) -> f64 {
    if agents <= 0 || traffic_intensity >= agents as f64 {
        return 1.0;
    }

    let erlang_c = erlang_c_probability(traffic_intensity, agents);
    let spare_capacity = agents as f64 - traffic_intensity;
    erlang_c * (-spare_capacity * target_answer_time / average_handle_time).exp()
}
