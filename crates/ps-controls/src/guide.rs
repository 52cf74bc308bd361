//! Manual tuning guidance shown alongside the form.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningStep {
    pub key: &'static str,
    pub text: &'static str,
}

const GUIDE: &[TuningStep] = &[
    TuningStep {
        key: "step_1",
        text: "Start with Kp only (Ki=0, Kd=0)",
    },
    TuningStep {
        key: "step_2",
        text: "Increase Kp until the system oscillates consistently",
    },
    TuningStep {
        key: "step_3",
        text: "Set Kp to 50% of the oscillation value",
    },
    TuningStep {
        key: "step_4",
        text: "Add Ki to eliminate steady-state error (start small)",
    },
    TuningStep {
        key: "step_5",
        text: "Add Kd to reduce overshoot and improve stability",
    },
    TuningStep {
        key: "kp_effects",
        text: "Higher Kp: faster response, but can cause overshoot/instability",
    },
    TuningStep {
        key: "ki_effects",
        text: "Higher Ki: eliminates steady-state error, but can cause overshoot",
    },
    TuningStep {
        key: "kd_effects",
        text: "Higher Kd: reduces overshoot, but sensitive to noise",
    },
    TuningStep {
        key: "tuning_order",
        text: "Usually tune in order: Kp → Ki → Kd",
    },
];

pub fn manual_tuning_guide() -> &'static [TuningStep] {
    GUIDE
}
