//! The built-in dataset: subject cards, per-subject experiment cards, and
//! the runnable definitions behind them.

use std::collections::HashMap;

use virtlab_types::{
    Difficulty, ExperimentDefinition, ExperimentId, ExperimentSummary, SimulationKind, SubjectId,
    SubjectInfo,
};

pub(crate) const SUBJECTS: &[SubjectInfo] = &[
    SubjectInfo {
        id: "physics",
        title: "Physics Lab",
        description: "Explore mechanics, electricity, and wave phenomena through interactive simulations",
        experiments: 8,
    },
    SubjectInfo {
        id: "chemistry",
        title: "Chemistry Lab",
        description: "Conduct safe chemical reactions and learn molecular interactions",
        experiments: 12,
    },
    SubjectInfo {
        id: "biology",
        title: "Biology Lab",
        description: "Study living organisms and biological processes in detail",
        experiments: 10,
    },
];

pub(crate) const PHYSICS_EXPERIMENTS: &[ExperimentSummary] = &[
    ExperimentSummary {
        id: "pendulum",
        title: "Simple Pendulum",
        description: "Study periodic motion and calculate gravitational acceleration",
        duration: "15 mins",
        difficulty: Difficulty::Beginner,
        objectives: &[
            "Understand periodic motion",
            "Calculate gravitational acceleration",
            "Analyze energy conservation",
        ],
        tools: &["Virtual pendulum", "Stopwatch", "Angle measurement tool"],
    },
    ExperimentSummary {
        id: "ohms-law",
        title: "Ohm's Law Circuit",
        description: "Explore the relationship between voltage, current, and resistance",
        duration: "20 mins",
        difficulty: Difficulty::Intermediate,
        objectives: &[
            "Verify Ohm's law",
            "Understand V-I relationship",
            "Measure electrical properties",
        ],
        tools: &["Virtual circuit board", "Multimeter", "Variable resistors"],
    },
    ExperimentSummary {
        id: "waves",
        title: "Wave Interference",
        description: "Observe constructive and destructive interference patterns",
        duration: "25 mins",
        difficulty: Difficulty::Advanced,
        objectives: &[
            "Study wave properties",
            "Analyze interference patterns",
            "Calculate wavelength",
        ],
        tools: &["Wave generator", "Interference simulator", "Measurement tools"],
    },
    ExperimentSummary {
        id: "projectile",
        title: "Projectile Motion",
        description: "Analyze motion of objects under gravity",
        duration: "18 mins",
        difficulty: Difficulty::Intermediate,
        objectives: &[
            "Study 2D motion",
            "Calculate range and height",
            "Understand trajectory",
        ],
        tools: &["Launch simulator", "Trajectory tracker", "Data analysis tools"],
    },
];

pub(crate) const CHEMISTRY_EXPERIMENTS: &[ExperimentSummary] = &[
    ExperimentSummary {
        id: "acid-base",
        title: "Acid-Base Titration",
        description: "Determine unknown concentration using titration methods",
        duration: "30 mins",
        difficulty: Difficulty::Intermediate,
        objectives: &[
            "Understand titration process",
            "Calculate molarity",
            "Identify endpoint",
        ],
        tools: &["Virtual burette", "pH meter", "Indicator solutions"],
    },
    ExperimentSummary {
        id: "reactions",
        title: "Chemical Reactions",
        description: "Explore different types of chemical reactions and products",
        duration: "25 mins",
        difficulty: Difficulty::Beginner,
        objectives: &["Classify reactions", "Balance equations", "Predict products"],
        tools: &["Reaction simulator", "Molecular viewer", "Equation balancer"],
    },
    ExperimentSummary {
        id: "equilibrium",
        title: "Chemical Equilibrium",
        description: "Study equilibrium principles and Le Chatelier's principle",
        duration: "35 mins",
        difficulty: Difficulty::Advanced,
        objectives: &[
            "Understand equilibrium",
            "Apply Le Chatelier's principle",
            "Calculate Kc",
        ],
        tools: &[
            "Equilibrium simulator",
            "Concentration tracker",
            "Temperature control",
        ],
    },
    ExperimentSummary {
        id: "spectroscopy",
        title: "UV-Vis Spectroscopy",
        description: "Analyze compounds using absorption spectroscopy",
        duration: "28 mins",
        difficulty: Difficulty::Advanced,
        objectives: &[
            "Understand absorption",
            "Create calibration curves",
            "Identify compounds",
        ],
        tools: &[
            "Virtual spectrometer",
            "Sample preparation",
            "Data analysis tools",
        ],
    },
];

pub(crate) const BIOLOGY_EXPERIMENTS: &[ExperimentSummary] = &[
    ExperimentSummary {
        id: "microscopy",
        title: "Virtual Microscopy",
        description: "Examine cell structures and tissues under different magnifications",
        duration: "20 mins",
        difficulty: Difficulty::Beginner,
        objectives: &[
            "Learn microscope operation",
            "Identify cell structures",
            "Compare cell types",
        ],
        tools: &["Virtual microscope", "Sample library", "Measurement tools"],
    },
    ExperimentSummary {
        id: "cell-division",
        title: "Cell Division",
        description: "Observe mitosis and meiosis processes in real-time",
        duration: "35 mins",
        difficulty: Difficulty::Intermediate,
        objectives: &[
            "Understand mitosis phases",
            "Compare mitosis vs meiosis",
            "Identify chromosomes",
        ],
        tools: &["Cell division simulator", "Phase identifier", "Time controls"],
    },
    ExperimentSummary {
        id: "genetics",
        title: "Genetics & Heredity",
        description: "Explore inheritance patterns and genetic crosses",
        duration: "40 mins",
        difficulty: Difficulty::Advanced,
        objectives: &[
            "Apply Mendel's laws",
            "Predict offspring ratios",
            "Analyze genetic disorders",
        ],
        tools: &[
            "Punnett square generator",
            "Pedigree analyzer",
            "Probability calculator",
        ],
    },
    ExperimentSummary {
        id: "photosynthesis",
        title: "Photosynthesis",
        description: "Study light-dependent and independent reactions",
        duration: "30 mins",
        difficulty: Difficulty::Intermediate,
        objectives: &[
            "Understand photosynthesis",
            "Measure oxygen production",
            "Analyze light effects",
        ],
        tools: &["Leaf simulator", "Gas measurement", "Light controls"],
    },
];

fn steps(steps: &[&str]) -> Vec<String> {
    steps.iter().map(|step| (*step).to_owned()).collect()
}

pub(crate) fn definitions() -> HashMap<(SubjectId, ExperimentId), ExperimentDefinition> {
    let entries = [
        (
            "physics",
            "pendulum",
            ExperimentDefinition::new(
                "Simple Pendulum",
                steps(&[
                    "Set up the pendulum with desired length",
                    "Choose initial angle (10-30 degrees)",
                    "Release the pendulum and start timing",
                    "Record 10 complete oscillations",
                    "Calculate the period and frequency",
                    "Analyze results and compare with theory",
                ]),
                "A simple pendulum consists of a mass suspended from a string. The period T \
                 depends on length L and gravitational acceleration g: T = 2π√(L/g)",
                SimulationKind::Pendulum,
            ),
        ),
        (
            "physics",
            "ohms-law",
            ExperimentDefinition::new(
                "Ohm's Law Circuit",
                steps(&[
                    "Build a simple circuit with resistor",
                    "Connect voltmeter and ammeter",
                    "Set initial voltage value",
                    "Measure current through resistor",
                    "Vary voltage and record readings",
                    "Plot V-I graph and calculate resistance",
                ]),
                "Ohm's law states that voltage is proportional to current: V = IR, where R is \
                 resistance.",
                SimulationKind::Circuit,
            ),
        ),
        (
            "chemistry",
            "acid-base",
            ExperimentDefinition::new(
                "Acid-Base Titration",
                steps(&[
                    "Prepare the acid solution in conical flask",
                    "Fill burette with base solution",
                    "Add indicator to acid solution",
                    "Titrate slowly while swirling",
                    "Record endpoint color change",
                    "Calculate concentration from volume",
                ]),
                "Titration determines unknown concentration by neutralization reaction. At \
                 endpoint: moles acid = moles base",
                SimulationKind::Titration,
            ),
        ),
        (
            "biology",
            "microscopy",
            ExperimentDefinition::new(
                "Virtual Microscopy",
                steps(&[
                    "Select specimen slide",
                    "Start with lowest magnification",
                    "Focus using coarse adjustment",
                    "Switch to higher magnification",
                    "Use fine focus for clarity",
                    "Identify and record structures",
                ]),
                "Microscopy allows observation of cellular structures. Resolution depends on \
                 wavelength of light used.",
                SimulationKind::Microscope,
            ),
        ),
    ];

    entries
        .into_iter()
        .map(|(subject, experiment, definition)| {
            let definition = definition.expect("built-in definitions have steps");
            (
                (SubjectId::new(subject), ExperimentId::new(experiment)),
                definition,
            )
        })
        .collect()
}
