use crate::domain::model::{Recipe, RecipeBook};

/// Paneer recipes measured at one to four servings, quantities in grams.
pub fn builtin_recipes() -> RecipeBook {
    RecipeBook::new()
        .with_recipe(
            Recipe::new("palak_paneer")
                .with_serving(
                    1,
                    &[
                        ("Onion", 85.0),
                        ("Garlic", 10.0),
                        ("Green_chilli", 0.90),
                        ("Tomato", 80.0),
                        ("Spinach", 125.0),
                        ("Paneer", 100.0),
                    ],
                )
                .with_serving(
                    2,
                    &[
                        ("Onion", 85.0),
                        ("Garlic", 16.63),
                        ("Green_chilli", 1.75),
                        ("Tomato", 110.0),
                        ("Spinach", 175.0),
                        ("Paneer", 200.0),
                    ],
                )
                .with_serving(
                    3,
                    &[
                        ("Onion", 110.0),
                        ("Garlic", 20.0),
                        ("Green_chilli", 2.58),
                        ("Tomato", 165.0),
                        ("Spinach", 275.0),
                        ("Paneer", 300.0),
                    ],
                )
                .with_serving(
                    4,
                    &[
                        ("Onion", 140.0),
                        ("Garlic", 25.0),
                        ("Green_chilli", 3.51),
                        ("Tomato", 220.0),
                        ("Spinach", 375.0),
                        ("Paneer", 400.0),
                    ],
                ),
        )
        .with_recipe(
            Recipe::new("shahi_paneer")
                .with_serving(
                    1,
                    &[
                        ("Green_chilli", 0.41),
                        ("Ginger_garlic", 10.0),
                        ("Tomato", 110.0),
                        ("Cashews", 5.0),
                        ("Paneer", 150.0),
                        ("Cream", 20.0),
                    ],
                )
                .with_serving(
                    2,
                    &[
                        ("Green_chilli", 0.90),
                        ("Ginger_garlic", 15.0),
                        ("Tomato", 165.0),
                        ("Cashews", 10.0),
                        ("Paneer", 200.0),
                        ("Cream", 30.0),
                    ],
                )
                .with_serving(
                    3,
                    &[
                        ("Green_chilli", 0.90),
                        ("Ginger_garlic", 20.0),
                        ("Tomato", 220.0),
                        ("Cashews", 15.0),
                        ("Paneer", 300.0),
                        ("Cream", 40.0),
                    ],
                )
                .with_serving(
                    4,
                    &[
                        ("Green_chilli", 0.90),
                        ("Ginger_garlic", 25.0),
                        ("Tomato", 275.0),
                        ("Cashews", 25.0),
                        ("Paneer", 400.0),
                        ("Cream", 50.0),
                    ],
                ),
        )
        .with_recipe(
            Recipe::new("matar_paneer")
                .with_serving(
                    1,
                    &[
                        ("Ginger", 3.13),
                        ("Green_chilli", 0.46),
                        ("Green_peas", 50.0),
                        ("Tomato", 110.0),
                        ("Paneer", 75.0),
                    ],
                )
                .with_serving(
                    2,
                    &[
                        ("Ginger", 6.25),
                        ("Green_chilli", 0.93),
                        ("Green_peas", 80.0),
                        ("Tomato", 165.0),
                        ("Paneer", 150.0),
                    ],
                )
                .with_serving(
                    3,
                    &[
                        ("Ginger", 9.38),
                        ("Green_chilli", 0.90),
                        ("Green_peas", 120.0),
                        ("Tomato", 245.0),
                        ("Paneer", 200.0),
                    ],
                )
                .with_serving(
                    4,
                    &[
                        ("Ginger", 12.50),
                        ("Green_chilli", 0.90),
                        ("Green_peas", 150.0),
                        ("Tomato", 330.0),
                        ("Paneer", 300.0),
                    ],
                ),
        )
        .with_recipe(
            Recipe::new("paneer_masala")
                .with_serving(
                    1,
                    &[
                        ("Green_chilli", 0.41),
                        ("Onion", 110.0),
                        ("Ginger_garlic", 10.0),
                        ("Tomato", 80.0),
                        ("Paneer", 150.0),
                    ],
                )
                .with_serving(
                    2,
                    &[
                        ("Green_chilli", 0.41),
                        ("Onion", 140.0),
                        ("Ginger_garlic", 15.0),
                        ("Tomato", 110.0),
                        ("Paneer", 200.0),
                    ],
                )
                .with_serving(
                    3,
                    &[
                        ("Green_chilli", 0.90),
                        ("Onion", 170.0),
                        ("Ginger_garlic", 20.0),
                        ("Tomato", 135.0),
                        ("Paneer", 300.0),
                    ],
                )
                .with_serving(
                    4,
                    &[
                        ("Green_chilli", 0.82),
                        ("Onion", 195.0),
                        ("Ginger_garlic", 25.0),
                        ("Tomato", 165.0),
                        ("Paneer", 400.0),
                    ],
                ),
        )
}
