use crate::dto::course_dto::CourseResponse;

/// (title, tag, duration, price, tutor, desc)
const DEMO: [(&str, &str, &str, &str, &str, &str); 9] = [
    ("Fundamentals of Mechanics", "jee", "30 hrs", "₹1,299", "Dr. Aryan", "Concept-first approach with solved problems."),
    ("Electrostatics Mastery", "jee", "22 hrs", "₹999", "Dr. Aryan", "Live sessions + topic videos."),
    ("Organic Chemistry Basics", "neet", "28 hrs", "₹1,099", "Ritu Ma'am", "Mechanisms & reaction maps."),
    ("Coordinate Geometry", "class12", "18 hrs", "₹699", "Sandeep Sir", "Tricks and shortcuts for scoring."),
    ("Biology — Genetics", "neet", "24 hrs", "₹899", "Anita", "Illustrated notes and tests."),
    ("Physics: Waves & Oscillations", "class12", "20 hrs", "₹749", "Dr. Aryan", "Wave equations, demos and MCQs."),
    ("Thermodynamics Concepts", "jee", "26 hrs", "₹1,149", "Manav Sir", "Laws, cycles and problems."),
    ("Human Physiology Overview", "neet", "16 hrs", "₹599", "Priya Ma'am", "Important systems & diagrams."),
    ("Probability & Combinatorics", "class12", "20 hrs", "₹799", "Sandeep Sir", "Examples and shortcut methods."),
];

/// Built-in catalog shown before the first successful sync.
pub fn demo_courses() -> Vec<CourseResponse> {
    DEMO.iter()
        .enumerate()
        .map(|(i, (title, tag, duration, price, tutor, desc))| CourseResponse {
            id: (i + 1).to_string(),
            title: title.to_string(),
            tag: tag.to_string(),
            duration: duration.to_string(),
            price: price.to_string(),
            tutor: tutor.to_string(),
            desc: desc.to_string(),
            created_at: None,
        })
        .collect()
}
