//! The normal-distribution scene.
//!
//! Axes fade in, a live density curve is drawn, the formula and live μ/σ readouts are
//! written, then the two trackers walk through [`TRANSITIONS`] before a final hold.

use crate::{
    density::{NormalParams, normal_pdf},
    foundation::{
        core::{Rect, palette},
        error::BellcurveResult,
    },
    scene::{
        animation::Animation,
        axes::{Axes, AxesConfig, AxisRange},
        driver::{Scene, SceneProgram},
        live::always_redraw,
        mobject::{Align, Corner, DEFAULT_CORNER_BUFF, DEFAULT_NEXT_TO_BUFF, Direction, Mobject},
        tracker::ValueTracker,
    },
};

/// Formula shown in the upper-left corner.
pub const DENSITY_TEX: &str = r"f(x) = \frac{1}{\sigma \sqrt{2\pi}} e^{-\frac{1}{2} \left(\frac{x - \mu}{\sigma}\right)^2}";

/// Font size of the formula.
pub const FORMULA_FONT_SIZE: f64 = 32.0;

/// Font size of the μ/σ readouts.
pub const LABEL_FONT_SIZE: f64 = 30.0;

/// Seconds per parameter transition.
pub const TRANSITION_RUN_TIME: f64 = 2.0;

/// Seconds the final state is held.
pub const FINAL_HOLD: f64 = 2.0;

/// Which tracker a transition drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    /// μ.
    Mean,
    /// σ.
    Sigma,
}

/// One parameter move.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transition {
    /// Tracker being moved.
    pub param: Param,
    /// Value at the end of the move.
    pub target: f64,
}

/// The fixed sequence of parameter moves, played one after another.
pub const TRANSITIONS: [Transition; 6] = [
    Transition {
        param: Param::Mean,
        target: 2.0,
    },
    Transition {
        param: Param::Sigma,
        target: 1.5,
    },
    Transition {
        param: Param::Mean,
        target: -3.5,
    },
    Transition {
        param: Param::Sigma,
        target: 0.5,
    },
    Transition {
        param: Param::Mean,
        target: 1.0,
    },
    Transition {
        param: Param::Sigma,
        target: 1.0,
    },
];

/// A transition with the values it moves between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScheduleStep {
    /// 1-based position in the sequence.
    pub step: usize,
    /// Tracker being moved.
    pub param: Param,
    /// Value at the start of the move.
    pub from: f64,
    /// Value at the end of the move.
    pub to: f64,
    /// Duration in seconds.
    pub run_time: f64,
}

/// Distribution parameters after each transition, starting from the standard normal.
pub fn schedule_states() -> Vec<NormalParams> {
    let mut state = NormalParams::STANDARD;
    TRANSITIONS
        .iter()
        .map(|t| {
            match t.param {
                Param::Mean => state.mean = t.target,
                Param::Sigma => state.sigma = t.target,
            }
            state
        })
        .collect()
}

/// The transition sequence with start and end values filled in.
pub fn schedule() -> Vec<ScheduleStep> {
    let mut state = NormalParams::STANDARD;
    TRANSITIONS
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let slot = match t.param {
                Param::Mean => &mut state.mean,
                Param::Sigma => &mut state.sigma,
            };
            let from = *slot;
            *slot = t.target;
            ScheduleStep {
                step: i + 1,
                param: t.param,
                from,
                to: t.target,
                run_time: TRANSITION_RUN_TIME,
            }
        })
        .collect()
}

/// TeX of the μ readout.
pub fn mean_label_tex(mean: f64) -> String {
    format!(r"\mu = {mean:.2}")
}

/// TeX of the σ readout.
pub fn sigma_label_tex(sigma: f64) -> String {
    format!(r"\sigma = {sigma:.2}")
}

/// Axes with x in [-10, 10] and y in [0, 0.5], 10 by 5 units, numbered.
pub fn normal_axes() -> BellcurveResult<Axes> {
    Axes::new(AxesConfig {
        x_range: AxisRange::new(-10.0, 10.0, 1.0),
        y_range: AxisRange::new(0.0, 0.5, 0.1),
        x_length: 10.0,
        y_length: 5.0,
        include_numbers: true,
        ..AxesConfig::default()
    })
}

/// μ and σ readouts stacked under `anchor`, left edges aligned.
pub fn parameter_labels(mean: f64, sigma: f64, anchor: Rect) -> BellcurveResult<(Mobject, Mobject)> {
    let mu = Mobject::math(&mean_label_tex(mean), LABEL_FONT_SIZE)?.next_to(
        anchor,
        Direction::Down,
        Align::Left,
        DEFAULT_NEXT_TO_BUFF,
    );
    let sigma = Mobject::math(&sigma_label_tex(sigma), LABEL_FONT_SIZE)?.next_to(
        mu.bounds(),
        Direction::Down,
        Align::Left,
        DEFAULT_NEXT_TO_BUFF,
    );
    Ok((mu, sigma))
}

/// The normal-distribution scene.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalDistributionScene;

impl SceneProgram for NormalDistributionScene {
    fn name(&self) -> &str {
        "normal_distribution"
    }

    fn construct(&self, scene: &mut Scene<'_>) -> BellcurveResult<()> {
        let axes = normal_axes()?;
        let axes_node = scene.register(axes.mobject()?);
        let axis_labels = scene.register(axes.axis_labels("x", "f(x)")?);
        scene.play(
            vec![Animation::fade_in(axes_node), Animation::fade_in(axis_labels)],
            None,
        )?;

        let mu = ValueTracker::new(NormalParams::STANDARD.mean);
        let sigma = ValueTracker::new(NormalParams::STANDARD.sigma);

        let graph = always_redraw({
            let (axes, mu, sigma) = (axes.clone(), mu.clone(), sigma.clone());
            move || Ok(axes.plot(|x| normal_pdf(x, mu.get(), sigma.get()), palette::BLUE))
        });
        let graph = scene.register(graph);
        scene.play(vec![Animation::create(graph)], None)?;

        let equation = Mobject::math(DENSITY_TEX, FORMULA_FONT_SIZE)?.move_to_corner(
            Corner::UpperLeft,
            scene.frame(),
            DEFAULT_CORNER_BUFF,
        );
        let anchor = equation.bounds();
        let equation = scene.register(equation);
        scene.play(vec![Animation::write(equation)], None)?;

        let mu_label = always_redraw({
            let (mu, sigma) = (mu.clone(), sigma.clone());
            move || Ok(parameter_labels(mu.get(), sigma.get(), anchor)?.0)
        });
        let sigma_label = always_redraw({
            let (mu, sigma) = (mu.clone(), sigma.clone());
            move || Ok(parameter_labels(mu.get(), sigma.get(), anchor)?.1)
        });
        let mu_label = scene.register(mu_label);
        let sigma_label = scene.register(sigma_label);
        scene.play(
            vec![Animation::write(mu_label), Animation::write(sigma_label)],
            None,
        )?;

        for t in TRANSITIONS {
            let tracker = match t.param {
                Param::Mean => &mu,
                Param::Sigma => &sigma,
            };
            tracing::debug!(param = ?t.param, from = tracker.get(), to = t.target, "transition");
            scene.play(vec![tracker.animate_to(t.target)], Some(TRANSITION_RUN_TIME))?;
        }

        scene.wait(FINAL_HOLD)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/normal.rs"]
mod tests;
