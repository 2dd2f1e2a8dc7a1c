// ==================== STATIC CATALOG ====================
//
// Topic declaration order is significant: topics unlock strictly in the
// order they appear in TOPICS, regardless of where crowns were earned.

/// Static, never-changing description of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Category id (see CATEGORIES)
    pub category: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

/// XP required to reach each level (index 0 = level 1)
pub const LEVEL_XP_THRESHOLDS: [u32; 13] = [
    0, 100, 250, 500, 850, 1300, 1900, 2600, 3500, 4600, 6000, 7800, 10000,
];

pub const AVATARS: [&str; 12] = [
    "🦉", "🐱", "🐶", "🦊", "🐼", "🐸", "🦁", "🐯", "🐰", "🐻", "🦄", "🐲",
];

pub const CATEGORIES: [Category; 7] = [
    Category { id: "numbers", name: "Numbers", color: "#58CC02" },
    Category { id: "fractions", name: "Fractions & Decimals", color: "#CE82FF" },
    Category { id: "ratios", name: "Ratios & Percents", color: "#00CD9C" },
    Category { id: "geometry", name: "Geometry", color: "#1CB0F6" },
    Category { id: "data", name: "Data & Probability", color: "#FF9600" },
    Category { id: "algebra", name: "Pre-Algebra", color: "#FF4B4B" },
    Category { id: "extra", name: "Challenge Zone", color: "#F472B6" },
];

const fn def(
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    category: &'static str,
    color: &'static str,
    description: &'static str,
) -> TopicDefinition {
    TopicDefinition { id, name, emoji, category, color, description }
}

pub const TOPICS: [TopicDefinition; 20] = [
    // Numbers
    def("multiplication", "Multiplication", "✖️", "numbers", "#58CC02", "Multiply bigger numbers"),
    def("division", "Long Division", "➗", "numbers", "#58CC02", "Divide with remainders"),
    def("factors-multiples", "Factors & Multiples", "🔢", "numbers", "#58CC02", "GCF, LCM & prime factors"),
    // Fractions & Decimals
    def("fraction-basics", "Fraction Basics", "🍕", "fractions", "#CE82FF", "Simplify & compare fractions"),
    def("add-sub-fractions", "Add & Subtract Fractions", "➕", "fractions", "#CE82FF", "Add & subtract with unlike denominators"),
    def("multiply-divide-fractions", "Multiply & Divide Fractions", "🔄", "fractions", "#CE82FF", "Fraction multiplication & division"),
    def("decimals", "Decimals", "🔵", "fractions", "#CE82FF", "Decimal operations & conversions"),
    // Ratios & Percents
    def("ratios", "Ratios", "⚖️", "ratios", "#00CD9C", "Write & simplify ratios"),
    def("proportions", "Proportions", "📏", "ratios", "#00CD9C", "Solve proportions & cross-multiply"),
    def("percentages", "Percentages", "💯", "ratios", "#00CD9C", "Find percents, discounts & tips"),
    // Geometry
    def("area-perimeter", "Area & Perimeter", "📐", "geometry", "#1CB0F6", "Rectangles, triangles & more"),
    def("volume", "Volume", "📦", "geometry", "#1CB0F6", "Volume of 3D shapes"),
    def("angles", "Angles & Triangles", "📊", "geometry", "#1CB0F6", "Angle types & triangle rules"),
    // Data & Probability
    def("mean-median-mode", "Mean, Median, Mode", "📊", "data", "#FF9600", "Find averages & middle values"),
    def("probability", "Probability", "🎲", "data", "#FF9600", "Chances of events happening"),
    def("coordinate-plane", "Coordinate Plane", "🗺️", "data", "#FF9600", "Plot & read ordered pairs"),
    // Pre-Algebra
    def("integers", "Integers", "🌡️", "algebra", "#FF4B4B", "Positive & negative numbers"),
    def("order-of-operations", "Order of Operations", "🎯", "algebra", "#FF4B4B", "PEMDAS practice"),
    def("simple-equations", "Simple Equations", "🔍", "algebra", "#FF4B4B", "Solve for the unknown"),
    // Challenge Zone
    def("exponents", "Exponents & Roots", "⚡", "extra", "#F472B6", "Powers & square roots"),
];

/// Look up a topic definition by id
pub fn topic(id: &str) -> Option<&'static TopicDefinition> {
    TOPICS.iter().find(|t| t.id == id)
}

/// Topic ids in catalog order
pub fn topic_ids() -> impl Iterator<Item = &'static str> {
    TOPICS.iter().map(|t| t.id)
}

pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Topics of one category, in catalog order
pub fn topics_in_category(category_id: &str) -> impl Iterator<Item = &'static TopicDefinition> + '_ {
    TOPICS.iter().filter(move |t| t.category == category_id)
}
