//! Curated event presets for the deli, market, butcher counter and bakery.

use super::{DrinkSections, FoodSections, KbRecord};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn food(appetizers: &[&str], mains: &[&str], sides: &[&str], desserts: &[&str]) -> FoodSections {
    FoodSections {
        appetizers: list(appetizers),
        mains: list(mains),
        sides: list(sides),
        desserts: list(desserts),
    }
}

fn drinks(alcoholic: &[&str], non_alcoholic: &[&str], coffee: &[&str]) -> DrinkSections {
    DrinkSections {
        alcoholic: list(alcoholic),
        non_alcoholic: list(non_alcoholic),
        coffee: list(coffee),
    }
}

fn record(food: FoodSections, drinks: DrinkSections, tags: &[&str], notes: Option<&str>) -> KbRecord {
    KbRecord {
        food,
        drinks,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        notes: notes.map(str::to_string),
    }
}

pub(super) fn builtin_records() -> Vec<(&'static str, KbRecord)> {
    vec![
        // Casual / everyday
        (
            "pizza night",
            record(
                food(
                    &[
                        "Garlic knots",
                        "Arancini (Sicilian rice balls)",
                        "House salad",
                    ],
                    &[
                        "12–16\" Pizzas (Cheese, Pepperoni, Margherita)",
                        "Stromboli",
                        "Calzone",
                    ],
                    &["Fried mozzarella", "Roasted veggies"],
                    &[
                        "Cannoli (plain or chocolate-dipped)",
                        "Assorted Italian cookies",
                    ],
                ),
                drinks(
                    &["Light lager", "Italian pilsner", "Chianti (red)"],
                    &["Cola", "Lemonade", "Sparkling water"],
                    &["Espresso", "Cappuccino"],
                ),
                &["casual", "shareable", "family-friendly", "pizza"],
                Some("Pizzas & house specialties like Calzone/Stromboli are the deli’s staples."),
            ),
        ),
        (
            "italian family dinner",
            record(
                food(
                    &[
                        "Burrata with prosciutto & tomatoes",
                        "Homemade meatballs",
                        "Tomato & fresh mozzarella platter",
                    ],
                    &[
                        "Lasagna (house)",
                        "Chicken Parmigiana",
                        "Penne alla Vodka or Bolognese",
                    ],
                    &["Garlic bread", "Caesar or Italian chopped salad"],
                    &["Tiramisu", "Sfogliatelle", "Cheesecake"],
                ),
                drinks(
                    &["Sangiovese", "Montepulciano d’Abruzzo"],
                    &["Italian sodas", "Iced tea"],
                    &["Espresso", "Macchiato"],
                ),
                &["family-style", "comfort", "classic-italian"],
                None,
            ),
        ),
        (
            "game day / tailgate",
            record(
                food(
                    &[
                        "Wings (garlic lemon herb)",
                        "Fritto misto (fried calamari & shrimp)",
                        "Pepperoni rolls or Sausage Roll",
                    ],
                    &[
                        "Stromboli (salami, mortadella, mozzarella)",
                        "The Sicilian sandwich (salumi, provolone, roasted peppers)",
                        "Meatball subs",
                    ],
                    &["Potato wedges", "Coleslaw"],
                    &["Brownies", "Cookie tray"],
                ),
                drinks(
                    &["Pale ale", "Amber lager"],
                    &["Cola", "Sports drinks", "Lemonade"],
                    &[],
                ),
                &["casual", "shareable", "game-day"],
                None,
            ),
        ),
        (
            "office lunch / team meeting",
            record(
                food(
                    &[
                        "Gourmet marinated antipasto platter",
                        "Tomato & fresh mozzarella platter",
                    ],
                    &[
                        "Assorted Classic Italian cold cut sandwiches",
                        "Chicken Parm sandwich",
                        "Pasta tray (Baked ziti or Penne alla Vodka)",
                    ],
                    &["House salad", "Chips"],
                    &["Assorted Italian cookies", "Mini cannoli"],
                ),
                drinks(
                    &[],
                    &["Bottled water", "Iced tea", "Lemonade"],
                    &["Coffee urn", "Cappuccino (on request)"],
                ),
                &["catering", "platter", "office-friendly"],
                None,
            ),
        ),
        (
            "kids birthday",
            record(
                food(
                    &["Cheesy garlic bread", "Fruit platter"],
                    &["Cheese pizza", "Chicken tenders", "Mini meatball sliders"],
                    &["Mac & cheese", "Carrot sticks & ranch"],
                    &["Chocolate chip cookies", "Mini cannoli", "Cupcakes"],
                ),
                drinks(&[], &["Fruit punch", "Lemonade", "Water"], &[]),
                &["kid-friendly", "nut-free-option", "shareable"],
                None,
            ),
        ),
        (
            "date night (italian)",
            record(
                food(
                    &["Burrata with balsamic & EVOO", "Arancini"],
                    &[
                        "Chicken or Eggplant Parmigiana",
                        "Herb-crusted salmon (if featured) or Shrimp Fra Diavolo",
                        "Wild mushroom risotto (veg option)",
                    ],
                    &["Grilled asparagus", "Truffle mashed potatoes"],
                    &["Tiramisu", "Chocolate cannoli"],
                ),
                drinks(
                    &["Pinot Noir", "Barbera", "Prosecco"],
                    &[],
                    &["Espresso", "Cappuccino"],
                ),
                &["elegant", "date-night"],
                None,
            ),
        ),
        // Catering & holidays
        (
            "holiday antipasto & dessert trays",
            record(
                food(
                    &[
                        "Gourmet meat antipasto (prosciutto, sopressata, imported provolone)",
                        "Marinated artichokes, olives, mushrooms",
                    ],
                    &[],
                    &[],
                    &[
                        "Assorted biscotti & cookies",
                        "Pignoli & almond macaroons",
                        "Italian rum cake or Cannoli cake",
                    ],
                ),
                drinks(
                    &["Prosecco", "Moscato d’Asti"],
                    &[],
                    &["Espresso", "Americano"],
                ),
                &["holiday", "platter", "bakery"],
                None,
            ),
        ),
        // Market / butcher / DIY
        (
            "butcher grill pack",
            record(
                food(
                    &["Caprese skewers"],
                    &[
                        "House Italian sausage links (hot/sweet/fennel)",
                        "Marinated chicken cutlets",
                        "Homemade beef meatballs (for subs)",
                    ],
                    &["Deli salads (pasta salad, potato salad)"],
                    &["Cookie tray"],
                ),
                drinks(
                    &["Italian lager", "Chianti for meatball subs"],
                    &["Sparkling water", "Iced tea"],
                    &[],
                ),
                &["butcher", "grill", "cook-at-home"],
                None,
            ),
        ),
        (
            "build-your-own pasta kit",
            record(
                food(
                    &["Garlic bread", "Antipasto cup (olives, artichokes)"],
                    &[
                        "Fresh pasta (spaghetti/rigatoni/penne)",
                        "House sauces (marinara, vodka, pesto, bolognese)",
                        "Add-ons: meatballs, sausage, grilled chicken",
                    ],
                    &["Caesar or house salad"],
                    &["Sfogliatelle", "Biscotti assortment"],
                ),
                drinks(&["Chianti", "Nero d’Avola"], &[], &["Cappuccino"]),
                &["market", "DIY", "family-style"],
                None,
            ),
        ),
        (
            "coffee & pastry break",
            record(
                food(
                    &[],
                    &[],
                    &[],
                    &[
                        "Cannoli (plain/chocolate/mini)",
                        "Eclairs",
                        "Cuccidati (fig cookies)",
                        "Bread pudding (Panettone-based, seasonal)",
                    ],
                ),
                drinks(
                    &[],
                    &["Hot chocolate", "Bottled water"],
                    &["Espresso", "Cappuccino", "Latte"],
                ),
                &["bakery", "coffee", "afternoon"],
                None,
            ),
        ),
        // Sandwiches / subs
        (
            "italian sub platter",
            record(
                food(
                    &["Tomato & fresh mozzarella platter"],
                    &[
                        "Classic Italian Cold Cut subs",
                        "The Sicilian sandwich",
                        "Chicken cutlet & eggplant parm subs (mix)",
                    ],
                    &["Chips", "Italian chopped salad"],
                    &["Mini cannoli", "Assorted cookies"],
                ),
                drinks(&[], &["Soda cans", "Iced tea", "Water"], &[]),
                &["catering", "sandwich", "office-friendly"],
                None,
            ),
        ),
    ]
}
