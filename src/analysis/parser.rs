use super::record::{NutritionRecord, UNKNOWN_FOOD};

/// Turns a free-text model reply into a structured record. Best effort by
/// design: unrecognized fields keep their defaults, and this never fails.
///
/// Each line is claimed by the first matching keyword branch, tested in the
/// fixed order calories > protein > carb > fat > ingredients. A line that
/// matches nothing becomes the food name if one has not been set yet.
pub fn parse_analysis(text: &str) -> NutritionRecord {
    let mut food_name = UNKNOWN_FOOD.to_string();
    let mut calories: u32 = 0;
    let mut protein = "0g".to_string();
    let mut carbs = "0g".to_string();
    let mut fat = "0g".to_string();
    let mut ingredients: Vec<String> = Vec::new();

    for line in text.lines() {
        let lowered = line.to_lowercase();
        if lowered.contains("calories") {
            if let Some(value) = first_number(line) {
                calories = value;
            }
        } else if lowered.contains("protein") {
            if let Some(value) = after_last_colon(line) {
                protein = value;
            }
        } else if lowered.contains("carb") {
            if let Some(value) = after_last_colon(line) {
                carbs = value;
            }
        } else if lowered.contains("fat") {
            if let Some(value) = after_last_colon(line) {
                fat = value;
            }
        } else if lowered.contains("ingredients") {
            if let Some(list) = after_last_colon(line) {
                // split unconditionally; trailing or doubled commas leave
                // empty elements in place
                ingredients = list.split(',').map(|piece| piece.trim().to_string()).collect();
            }
        } else if food_name == UNKNOWN_FOOD && !line.is_empty() {
            food_name = line.trim().to_string();
        }
    }

    NutritionRecord::new(food_name, calories, protein, carbs, fat, ingredients)
}

// First maximal run of decimal digits anywhere in the line.
fn first_number(line: &str) -> Option<u32> {
    let digits: String = line
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

fn after_last_colon(line: &str) -> Option<String> {
    line.rfind(':').map(|idx| line[idx + 1..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_reply() {
        let text = "Chicken Salad\nCalories: 350\nProtein: 25g\nCarbs: 15g\nFat: 12g\nIngredients: Chicken, Lettuce, Tomatoes";
        let record = parse_analysis(text);
        assert_eq!(record.food_name, "Chicken Salad");
        assert_eq!(record.calories, 350);
        assert_eq!(record.protein, "25g");
        assert_eq!(record.carbs, "15g");
        assert_eq!(record.fat, "12g");
        assert_eq!(record.ingredients, vec!["Chicken", "Lettuce", "Tomatoes"]);
    }

    #[test]
    fn keyword_free_text_yields_defaults_with_first_line_as_name() {
        let record = parse_analysis("A lovely plate of something\nwith a second line");
        assert_eq!(record.food_name, "A lovely plate of something");
        assert_eq!(record.calories, 0);
        assert_eq!(record.protein, "0g");
        assert_eq!(record.carbs, "0g");
        assert_eq!(record.fat, "0g");
        assert!(record.ingredients.is_empty());
    }

    #[test]
    fn empty_text_keeps_the_sentinel_name() {
        let record = parse_analysis("\n\n");
        assert_eq!(record.food_name, UNKNOWN_FOOD);
        assert_eq!(record.calories, 0);
    }

    #[test]
    fn calories_line_without_digits_leaves_calories_unchanged() {
        let record = parse_analysis("Soup\nCalories: unknown");
        assert_eq!(record.calories, 0);
    }

    #[test]
    fn a_line_with_calories_and_protein_is_a_calories_line() {
        let record = parse_analysis("Calories: 200 Protein: 10g");
        assert_eq!(record.calories, 200);
        assert_eq!(record.protein, "0g");
    }

    #[test]
    fn keyword_line_without_a_colon_keeps_the_default() {
        let record = parse_analysis("Omelette\nhigh in protein");
        assert_eq!(record.protein, "0g");
        assert_eq!(record.food_name, "Omelette");
    }

    #[test]
    fn ingredient_list_keeps_empty_pieces() {
        let record = parse_analysis("Ingredients: Rice, Beans,");
        assert_eq!(record.ingredients, vec!["Rice", "Beans", ""]);
    }

    #[test]
    fn value_comes_from_after_the_last_colon() {
        let record = parse_analysis("Note: Protein: 30g");
        assert_eq!(record.protein, "30g");
    }

    #[test]
    fn only_the_first_unmatched_line_names_the_food() {
        let record = parse_analysis("  Greek Yogurt  \nCalories: 150\nwith honey");
        assert_eq!(record.food_name, "Greek Yogurt");
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let record = parse_analysis("Pasta\nCALORIES: 480\nTotal FAT: 9g");
        assert_eq!(record.calories, 480);
        assert_eq!(record.fat, "9g");
    }
}
