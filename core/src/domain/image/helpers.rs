/// Cooking-verb families checked in order; the first family found picks the hint.
const PREPARATION_HINTS: &[(&[&str], &str)] = &[
    (
        &["mash", "puree", "blend", "crush"],
        "Show in mashed, pureed, or blended form with smooth, creamy texture.",
    ),
    (
        &["layer", "arrange", "stack"],
        "Show the layered presentation with visible distinct layers.",
    ),
    (
        &["mix", "toss", "combine", "stir together"],
        "Show ingredients thoroughly mixed and combined in the dish.",
    ),
    (
        &["simmer", "stew", "braise"],
        "Show as a simmered dish with rich sauce or gravy coating the ingredients.",
    ),
    (
        &["roast", "bake"],
        "Show the roasted/baked dish with golden-brown caramelization.",
    ),
    (
        &["fry", "sauté", "saute"],
        "Show the fried/sautéed dish with golden, crispy appearance.",
    ),
    (&["grill", "char", "smoke"], "Show grill marks or charred appearance."),
    (
        &["stuff", "fill"],
        "Show the stuffed presentation with filling visible.",
    ),
];

pub fn preparation_hint(instructions: &[String]) -> Option<&'static str> {
    let text = instructions.join(" ").to_lowercase();

    PREPARATION_HINTS
        .iter()
        .find(|(verbs, _)| verbs.iter().any(|verb| text.contains(verb)))
        .map(|(_, hint)| *hint)
}

pub fn image_prompt(title: &str, description: &str, instructions: &[String]) -> String {
    let mut lines = vec![
        format!("A professional, realistic food photography image of {title}."),
        format!("{description}."),
    ];

    if let Some(hint) = preparation_hint(instructions) {
        lines.push(hint.to_string());
    }

    lines.extend(
        [
            "IMPORTANT: Show the FINISHED, PLATED DISH as it would be served to a customer, not raw ingredients or cooking process.",
            "Close-up shot with soft natural lighting, shallow depth of field, photographed on a rustic wooden table with elegant tableware.",
            "Include fresh garnishes and complementary ingredients in the background. Use warm, appetizing colors.",
            "Ensure all details are photo-realistic and not illustrations.",
            "High-resolution, magazine-quality food photography of the completed, ready-to-eat dish.",
        ]
        .map(str::to_string),
    );

    lines.join("\n")
}
