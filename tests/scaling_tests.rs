#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lievitati::recipe_model::{
        Dough, Ingredient, IngredientGroup, Recipe, RecipeCategory, Starter,
    };
    use lievitati::scaling::{scale_recipe, ScaleParams, ScaledRecipe};
    use lievitati::units::IngredientUnit;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn base_recipe() -> Recipe {
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap();
        let mut recipe = Recipe::new("Panettone Classico", RecipeCategory::Panettone, now);
        recipe.pieces = 1;
        recipe.dough_per_piece_g = 1000.0;
        recipe.doughs = vec![Dough::with_ingredients(
            "Main dough",
            vec![
                Ingredient::new("Flour").with_qty(500.0),
                Ingredient::new("Water")
                    .with_qty(300.0)
                    .with_group(IngredientGroup::Liquid),
            ],
        )];
        recipe.steps = Vec::new();
        recipe
    }

    fn params(pieces: u32, weight: f64) -> ScaleParams {
        ScaleParams {
            pieces,
            dough_per_piece_g: weight,
            starter_id: None,
        }
    }

    fn total<'a>(scaled: &'a ScaledRecipe, name: &str) -> &'a lievitati::scaling::TotalRow {
        scaled
            .totals
            .iter()
            .find(|row| row.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(|| panic!("no totals row named {name}"))
    }

    #[test]
    fn test_end_to_end_scenario() {
        let recipe = base_recipe();
        let scaled = scale_recipe(&recipe, &params(3, 1100.0));

        assert!(approx_eq(scaled.scale_factor, 1.1));
        assert!(approx_eq(scaled.total_dough_g, 3300.0));
        assert!(approx_eq(total(&scaled, "Flour").total_g.unwrap(), 1650.0));
        assert!(approx_eq(total(&scaled, "Water").total_g.unwrap(), 990.0));

        let flour_row = &scaled.doughs[0].ingredients[0];
        assert!(approx_eq(flour_row.bakers_pct.unwrap(), 100.0));
        let water_row = &scaled.doughs[0].ingredients[1];
        assert!(approx_eq(water_row.bakers_pct.unwrap(), 60.0));
    }

    #[test]
    fn test_merge_by_folded_name_across_doughs() {
        let mut recipe = base_recipe();
        recipe.doughs.push(Dough::with_ingredients(
            "Second dough",
            vec![Ingredient::new("flour ").with_qty(200.0)],
        ));

        let scaled = scale_recipe(&recipe, &params(2, 1000.0));
        let flour = total(&scaled, "Flour");
        // (500 + 200) * 1.0 * 2 pieces
        assert!(approx_eq(flour.total_g.unwrap(), 1400.0));
        // the dough-side, first-seen spelling wins
        assert_eq!(flour.name, "Flour");
        assert_eq!(scaled.totals.len(), 2);
    }

    #[test]
    fn test_totals_sorted_case_insensitively() {
        let mut recipe = base_recipe();
        recipe.doughs[0].ingredients = vec![
            Ingredient::new("water").with_qty(300.0),
            Ingredient::new("Butter").with_qty(150.0),
            Ingredient::new("almonds").with_qty(80.0),
        ];
        let scaled = scale_recipe(&recipe, &params(1, 1000.0));
        let names: Vec<&str> = scaled.totals.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["almonds", "Butter", "water"]);
    }

    #[test]
    fn test_count_unit_without_weight_keeps_grams_unknown() {
        let mut recipe = base_recipe();
        recipe.doughs[0].ingredients.push(
            Ingredient::new("Eggs")
                .with_qty(2.0)
                .with_unit(IngredientUnit::Count)
                .with_group(IngredientGroup::Eggs),
        );

        let scaled = scale_recipe(&recipe, &params(4, 1000.0));
        let eggs = total(&scaled, "Eggs");
        assert_eq!(eggs.total_g, None);
        assert!(approx_eq(eggs.total_count, 8.0));

        // the unknown gram figure also blanks the baker's percentage
        let eggs_row = &scaled.doughs[0].ingredients[2];
        assert_eq!(eggs_row.bakers_pct, None);
    }

    #[test]
    fn test_count_unit_with_weight_resolves_grams() {
        let mut recipe = base_recipe();
        recipe.doughs[0].ingredients.push(
            Ingredient::new("Eggs")
                .with_qty(2.0)
                .with_unit(IngredientUnit::Count)
                .with_unit_weight(50.0)
                .with_group(IngredientGroup::Eggs),
        );

        let scaled = scale_recipe(&recipe, &params(4, 1000.0));
        let eggs = total(&scaled, "Eggs");
        // 2 * 50 g * 4 pieces
        assert!(approx_eq(eggs.total_g.unwrap(), 400.0));
        assert!(approx_eq(eggs.total_count, 8.0));
    }

    #[test]
    fn test_mixed_known_and_unknown_grams_merge_without_zeroing() {
        let mut recipe = base_recipe();
        recipe.doughs[0].ingredients = vec![Ingredient::new("Candied orange")
            .with_qty(3.0)
            .with_unit(IngredientUnit::Count)
            .with_group(IngredientGroup::Aromatic)];
        recipe.doughs.push(Dough::with_ingredients(
            "Second dough",
            vec![Ingredient::new("candied orange")
                .with_qty(120.0)
                .with_group(IngredientGroup::Aromatic)],
        ));

        let scaled = scale_recipe(&recipe, &params(1, 1000.0));
        let orange = total(&scaled, "Candied orange");
        // the gram-denominated occurrence contributes; the weightless count
        // occurrence does not collapse the row to zero or erase the grams
        assert!(approx_eq(orange.total_g.unwrap(), 120.0));
        assert!(approx_eq(orange.total_count, 3.0));
    }

    #[test]
    fn test_selected_starter_joins_totals_and_flour_base() {
        let mut recipe = base_recipe();
        let mut starter = Starter::new("Lievito madre");
        starter.description = "Three refreshes".to_string();
        starter.ingredients = vec![
            Ingredient::new("Starter flour").with_qty(100.0),
            Ingredient::new("Water")
                .with_qty(50.0)
                .with_group(IngredientGroup::Liquid),
        ];
        let starter_id = starter.id.clone();
        recipe.starters.push(starter);

        let with_starter = scale_recipe(
            &recipe,
            &ScaleParams {
                pieces: 1,
                dough_per_piece_g: 1000.0,
                starter_id: Some(starter_id),
            },
        );
        // flour base now includes the starter's flour: 500 + 100
        assert!(approx_eq(with_starter.flour_base_g, 600.0));
        // water merges across the dough and the starter
        assert!(approx_eq(
            total(&with_starter, "Water").total_g.unwrap(),
            350.0
        ));
        let starter_view = with_starter.starter.as_ref().unwrap();
        assert_eq!(starter_view.name, "Lievito madre");
        assert_eq!(starter_view.description, "Three refreshes");
        assert_eq!(starter_view.ingredients.len(), 2);

        let without_starter = scale_recipe(&recipe, &params(1, 1000.0));
        assert!(without_starter.starter.is_none());
        assert!(approx_eq(without_starter.flour_base_g, 500.0));
        assert!(approx_eq(
            total(&without_starter, "Water").total_g.unwrap(),
            300.0
        ));
    }

    #[test]
    fn test_unknown_starter_id_scales_without_starter() {
        let recipe = base_recipe();
        let scaled = scale_recipe(
            &recipe,
            &ScaleParams {
                pieces: 1,
                dough_per_piece_g: 1000.0,
                starter_id: Some("missing".to_string()),
            },
        );
        assert!(scaled.starter.is_none());
        assert_eq!(scaled.totals.len(), 2);
    }

    #[test]
    fn test_count_unit_flour_excluded_from_denominator() {
        let mut recipe = base_recipe();
        // flour measured in pieces with a unit weight still stays out of the
        // percentage denominator
        recipe.doughs[0].ingredients.push(
            Ingredient::new("Flour cubes")
                .with_qty(4.0)
                .with_unit(IngredientUnit::Count)
                .with_unit_weight(25.0)
                .with_group(IngredientGroup::Flour),
        );
        let scaled = scale_recipe(&recipe, &params(1, 1000.0));
        assert!(approx_eq(scaled.flour_base_g, 500.0));
    }

    #[test]
    fn test_zero_flour_base_blanks_percentages() {
        let mut recipe = base_recipe();
        for ingredient in &mut recipe.doughs[0].ingredients {
            ingredient.group = IngredientGroup::Other;
        }
        let scaled = scale_recipe(&recipe, &params(1, 1000.0));
        assert!(approx_eq(scaled.flour_base_g, 0.0));
        for row in &scaled.doughs[0].ingredients {
            assert_eq!(row.bakers_pct, None);
        }
    }

    #[test]
    fn test_snapshot_is_not_mutated() {
        let recipe = base_recipe();
        let before = recipe.clone();
        let _ = scale_recipe(&recipe, &params(7, 1234.0));
        assert_eq!(recipe, before);
    }

    #[test]
    fn test_deterministic_output() {
        let recipe = base_recipe();
        let a = scale_recipe(&recipe, &params(3, 1100.0));
        let b = scale_recipe(&recipe, &params(3, 1100.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_baseline_params_pick_first_starter() {
        let mut recipe = base_recipe();
        recipe.starters.push(Starter::new("Poolish"));
        recipe.starters.push(Starter::new("Biga"));
        let params = ScaleParams::for_recipe(&recipe);
        assert_eq!(params.pieces, recipe.pieces);
        assert!(approx_eq(params.dough_per_piece_g, recipe.dough_per_piece_g));
        assert_eq!(params.starter_id.as_deref(), Some(recipe.starters[0].id.as_str()));
    }
}
