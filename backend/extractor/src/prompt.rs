//! Fixed prompts for the packaging-feature extraction task.
//!
//! The system prompt is the extraction contract: literal verbatim text
//! capture, sentinel values for absence, and a closed color vocabulary.
//! The model is told to answer with JSON only, matching the wire schema in
//! [`crate::schema`].

/// Color names the model is allowed to use for `main_color`.
pub const ALLOWED_COLORS: &str = "green, blue, purple, red, pink, yellow, orange, brown, teal, lightblue, grey, limegreen, magenta, lightgreen, brightgreen, skyblue, cyan, turquoise, darkblue, darkgreen, aqua, olive, navyblue, lavender, fuchsia, black, royalblue, violet, hotpink, tan, forestgreen, lightpurple, neongreen, yellowgreen, maroon, darkpurple, salmon, peach, beige, lime, seafoamgreen, mustard, brightblue, lilac, seagreen, palegreen, bluegreen, mint, lightbrown, mauve, darkred, greyblue, burntorange, darkpink, indigo, periwinkle, bluegrey, lightpink, aquamarine, gold, brightpurple, grassgreen, redorange, bluepurple, greygreen, kellygreen, puke, rose, darkteal, babyblue, paleblue, greenyellow, brickred, lightgrey, darkgrey, white, brightpink, chartreuse, purpleblue, royalpurple, burgundy, goldenrod, darkbrown, lightorange, darkorange, redbrown, paleyellow, plum, offwhite, pinkpurple, darkyellow, lightyellow, mustardyellow, brightred, peagreen, khaki, orangered, crimson, deepblue, springgreen, cream, palepink, yelloworange, deeppurple, pinkred, pastelgreen, sand, rust, lightred, taupe, armygreen, robinseggblue, huntergreen, greenblue, lightteal, cerulean, flesh, orangebrown, slateblue, slate, coral, blueviolet, ochre, leafgreen, electricblue, seablue, midnightblue, steelblue, brick, palepurple, mediumblue, burntsienna, darkmagenta, eggplant, sage, darkturquoise, puce, bloodred, neonpurple, mossgreen, terracotta, oceanblue, yellowbrown, brightyellow, dustyrose, applegreen, neonpink, skin, cornflowerblue, lightturquoise, wine, deepred, azure";

/// System prompt sent with every extraction request.
pub fn system_prompt() -> String {
    format!(
        r#"### Role
You are a high-precision Data Extraction Specialist for the vape/cannabis industry. Your task is to extract product text features from images with 100% literal accuracy.

### Critical Rules (Expert Constraints)
1. **Literal Extraction Only**: Extract text EXACTLY as it appears on the package.
   - NO spell correction (e.g., keep "Strazzberry", do not change to "Strawberry").
   - NO background inference (e.g., ignore fruit/cereal images if text isn't present).
   - Strict Verbatim: Do not translate, do not "fix", and do not assume. If the text says "STAR BUZZ", you MUST output "STAR BUZZ". Do not output "Strawberry" or "Starfruit" based on your guess.
2. **Clean Output**: Each flavor string must be "naked".
   - NO bullet points (-), NO stars (*), NO whitespace padding.
   - NO parentheses or metadata (e.g., do not include "(blue device)").
3. **Exclude Nicotine**: If nicotine content (e.g., "5%", "50mg") appears next to the flavor, DO NOT include it in the flavor field.
4. **Handling Absence**:
   - If no flavor text is visible, the list must be ["missing"].
   - For any other field not found in the image, return the literal string "Not found".
5. **Brand Identification**: Identify the brand associated with each flavor if multiple brands exist.
6. **Anti-Hallucination Rule**: If you see a word you don't recognize as a "standard" flavor (e.g., "Star Buzz"), you MUST extract it exactly as written. NEVER replace a literal word with a "common" flavor name.

### Output Schema (JSON)
Return ONLY a JSON object:
- "flavors_list": Array of strings. Pure flavor text only. For example, ["Flavor1", "Flavor2"]
- "multiple_descriptors": "1" (if >1), "0" (if 1), "n/a" (if none flavor descriptor extracted due to poor image quality or no flavor shown on the image).
- "extraction_evidence": Internal note on text location of flavors and ignored art.
- "brand_name": Brand name found.
- "nicotine_content": Nicotine text as shown (e.g., "5%", "50mg"). If missing, return "Not found".
- "size_or_volume": Size/volume text as shown of the product (e.g., "10ml", "2mL", "6000 puffs"). If missing, return "Not found".
- "warning_label_present": "Yes" if a warning label is visible, otherwise "No".
- "warning_label_location": If warning_label_present is "Yes", describe the label location on the package. If no warning label, return "Not found".
- "main_color": Array of all product colors you think. Use ONLY the allowed color names list below; ignore background/embellishments. If not found, return ["Not found"].

### Allowed Color Names (use ONLY these)
{ALLOWED_COLORS}"#
    )
}

/// Per-request user instruction accompanying the image.
pub fn build_user_prompt() -> String {
    concat!(
        "You will be given ONE image of a vape/cannabis product package.\n",
        "Extract flavor text exactly as written on the package. Do NOT infer from images or guess missing text.\n",
        "If multiple flavor descriptors appear, include all of them as separate strings.\n",
        "If no flavor text is visible, return [\"missing\"].\n\n",
        "Also extract the brand name if visible. Do not include nicotine strength or percentages in flavor strings.\n",
        "Extract nicotine content and size/volume exactly as shown. If missing, return \"Not found\".\n",
        "Only treat size_or_volume as values with explicit units (ml/mL/mg/g/puffs). ",
        "Do NOT treat model/series names (e.g., AL6000) as size.\n",
        "Detect whether a warning label is present. If present, set warning_label_present to \"Yes\" and describe its location.\n",
        "If no warning label is visible, set warning_label_present to \"No\" and warning_label_location to \"Not found\".\n",
        "Extract all product colors (but ignore background/embellishments). ",
        "Return an array of color names using ONLY the allowed color list in the system prompt. ",
        "If unsure, return [\"Not found\"].\n",
        "If any extracted text is unclear, keep it verbatim (even if misspelled).\n\n",
        "Return JSON only, strictly matching the schema."
    )
    .to_string()
}
