use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog;
use crate::question::{Question, QuestionGenerator};

/// Seeded procedural question generator covering every catalog topic.
///
/// Builds a bank of questions for the topic, shuffles it, and returns the
/// first `count`. Ids outside the catalog yield nothing.
pub struct ProceduralGenerator {
    rng: StdRng,
    next_id: u64,
}

impl ProceduralGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), next_id: 0 }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy(), next_id: 0 }
    }

    pub fn supports(topic_id: &str) -> bool {
        catalog::topic(topic_id).is_some()
    }

    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("q-{}", self.next_id)
    }

    // -------------------- Builders --------------------

    /// Multiple choice with a numeric answer. Distractors that collide with
    /// the answer (or each other) are replaced so there are always 4 options.
    fn mcq(&mut self, prompt: String, answer: i64, distractors: [i64; 3], hint: String) -> Question {
        let mut values = vec![answer];
        let mut bump = 1;
        for d in distractors {
            let mut candidate = d;
            while values.contains(&candidate) {
                candidate = answer + bump;
                bump += 1;
            }
            values.push(candidate);
        }

        let mut options: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        options.shuffle(&mut self.rng);
        let id = self.next_id();
        Question::multiple_choice(id, prompt, answer.to_string(), options, Some(hint))
    }

    /// Multiple choice with text options. Distractors equal to the answer
    /// or to an earlier option are dropped.
    fn mcq_choices(&mut self, prompt: String, answer: String, distractors: Vec<String>, hint: Option<String>) -> Question {
        let mut options = vec![answer.clone()];
        for d in distractors {
            if !options.contains(&d) {
                options.push(d);
            }
        }
        options.shuffle(&mut self.rng);
        let id = self.next_id();
        Question::multiple_choice(id, prompt, answer, options, hint)
    }

    /// Multiple choice with fixed text options (answer first in `choices`)
    fn mcq_text(&mut self, prompt: &str, choices: &[&str], hint: Option<&str>) -> Question {
        let distractors = choices[1..].iter().map(|c| c.to_string()).collect();
        self.mcq_choices(prompt.to_string(), choices[0].to_string(), distractors, hint.map(str::to_string))
    }

    fn typein(&mut self, prompt: String, answer: i64, hint: String) -> Question {
        let id = self.next_id();
        Question::type_in(id, prompt, answer.to_string(), Some(hint))
    }

    fn typein_text(&mut self, prompt: &str, answer: &str, hint: &str) -> Question {
        let id = self.next_id();
        Question::type_in(id, prompt.to_string(), answer.to_string(), Some(hint.to_string()))
    }

    // -------------------- Topic banks --------------------

    fn multiplication(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        // two-digit × one-digit
        for _ in 0..6 {
            let a: i64 = self.rng.gen_range(12..=99);
            let b: i64 = self.rng.gen_range(3..=9);
            let product = a * b;
            let hint = format!("Break it up: {a} × {b} = ({} × {b}) + ({} × {b})", a / 10 * 10, a % 10);
            qs.push(self.mcq(format!("What is {a} × {b}?"), product, [product + b, product - b, product + 10], hint));
        }
        // two-digit × two-digit
        for _ in 0..4 {
            let a: i64 = self.rng.gen_range(11..=25);
            let b: i64 = self.rng.gen_range(11..=25);
            qs.push(self.typein(format!("What is {a} × {b}?"), a * b, "Try breaking it into parts!".to_string()));
        }
        qs.push(self.mcq(
            "A box has 24 crayons. How many crayons are in 8 boxes?".to_string(),
            192,
            [182, 196, 176],
            "24 × 8 = 192".to_string(),
        ));
        qs
    }

    fn division(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..5 {
            let divisor: i64 = self.rng.gen_range(3..=12);
            let quotient: i64 = self.rng.gen_range(5..=25);
            let dividend = divisor * quotient;
            let hint = format!("Think: what times {divisor} equals {dividend}?");
            qs.push(self.mcq(format!("What is {dividend} ÷ {divisor}?"), quotient, [quotient + 1, quotient - 1, quotient + 3], hint));
        }
        for _ in 0..3 {
            let divisor: i64 = self.rng.gen_range(4..=8);
            let quotient: i64 = self.rng.gen_range(10..=30);
            let dividend = divisor * quotient;
            let hint = format!("What times {divisor} equals {dividend}?");
            qs.push(self.typein(format!("{dividend} ÷ {divisor} = ?"), quotient, hint));
        }
        qs.push(self.mcq(
            "96 stickers are shared equally among 8 friends. How many does each get?".to_string(),
            12,
            [11, 14, 88],
            "96 ÷ 8 = 12".to_string(),
        ));
        qs.push(self.mcq(
            "A 144-page book is read at 12 pages a day. How many days does it take?".to_string(),
            12,
            [10, 14, 132],
            "144 ÷ 12 = 12".to_string(),
        ));
        qs
    }

    fn factors_multiples(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for (a, b) in [(12, 18), (8, 20), (15, 25), (24, 36), (16, 28)] {
            let g = gcd(a, b);
            qs.push(self.mcq(
                format!("What is the GCF (Greatest Common Factor) of {a} and {b}?"),
                g,
                [g + 1, g * 2, a.min(b)],
                "List factors of both numbers and find the biggest one they share".to_string(),
            ));
        }
        for (a, b) in [(4, 6), (3, 8), (5, 7), (6, 9), (8, 12)] {
            let l = lcm(a, b);
            qs.push(self.mcq(
                format!("What is the LCM (Least Common Multiple) of {a} and {b}?"),
                l,
                [l + a, a * b, l - b],
                "List multiples of each number until you find the first one they share".to_string(),
            ));
        }
        qs.push(self.mcq_text("Is 17 a prime number?", &["Yes", "No"], Some("A prime number has only 2 factors: 1 and itself")));
        qs.push(self.mcq_text("Is 21 a prime number?", &["No", "Yes"], Some("21 = 3 × 7, so it is not prime")));
        qs
    }

    fn fraction_basics(&mut self) -> Vec<Question> {
        const POOL: [&str; 7] = ["1/2", "1/3", "2/3", "3/4", "3/5", "1/4", "2/5"];
        let mut qs = Vec::new();
        for (n, d, answer) in [(4, 8, "1/2"), (3, 9, "1/3"), (6, 10, "3/5"), (8, 12, "2/3"), (10, 15, "2/3"), (6, 8, "3/4"), (4, 6, "2/3")] {
            let mut distractors: Vec<String> = POOL.iter().filter(|v| **v != answer).map(|v| v.to_string()).collect();
            distractors.shuffle(&mut self.rng);
            distractors.truncate(3);
            qs.push(self.mcq_choices(
                format!("Simplify {n}/{d}"),
                answer.to_string(),
                distractors,
                Some("Divide both by their GCF".to_string()),
            ));
        }
        qs.push(self.mcq_text("Which is larger: 3/4 or 2/3?", &["3/4", "2/3", "They are equal"], Some("Find common denominators: 9/12 vs 8/12")));
        qs.push(self.mcq_text("Which is larger: 5/8 or 3/5?", &["5/8", "3/5", "They are equal"], Some("25/40 vs 24/40")));
        qs.push(self.mcq_text("Convert 7/3 to a mixed number", &["2 1/3", "1 2/3", "3 1/7", "2 1/7"], None));
        qs.push(self.mcq_text("Convert 11/4 to a mixed number", &["2 3/4", "3 1/4", "1 3/4", "2 1/4"], None));
        qs.push(self.mcq_text("Convert 3 1/2 to an improper fraction", &["7/2", "5/2", "6/2", "3/2"], None));
        qs
    }

    fn add_sub_fractions(&mut self) -> Vec<Question> {
        vec![
            self.mcq_text("1/5 + 2/5 = ?", &["3/5", "2/5", "3/10", "1/5"], None),
            self.mcq_text("5/8 - 3/8 = ?", &["1/4", "2/16", "3/8", "8/8"], Some("Subtract numerators: 2/8, then simplify")),
            self.mcq_text("1/3 + 1/4 = ?", &["7/12", "2/7", "1/7", "5/12"], Some("LCD is 12: 4/12 + 3/12")),
            self.mcq_text("1/2 + 1/3 = ?", &["5/6", "2/5", "1/6", "3/6"], Some("LCD is 6: 3/6 + 2/6")),
            self.mcq_text("3/4 - 1/3 = ?", &["5/12", "2/1", "2/12", "1/4"], Some("LCD is 12: 9/12 - 4/12")),
            self.mcq_text("2/3 + 1/6 = ?", &["5/6", "3/9", "3/6", "1/2"], Some("LCD is 6: 4/6 + 1/6")),
            self.mcq_text("3/5 - 1/4 = ?", &["7/20", "2/1", "2/20", "1/5"], Some("LCD is 20: 12/20 - 5/20")),
            self.mcq_text("1 1/2 + 2 1/3 = ?", &["3 5/6", "3 2/5", "4 1/6", "3 1/5"], None),
            self.mcq_text("3 1/4 - 1 1/2 = ?", &["1 3/4", "2 1/4", "1 1/2", "2 3/4"], None),
            self.typein_text("What is 1/4 + 1/4?", "1/2", "Add the numerators: 2/4 = 1/2"),
            self.typein_text("What is 1/2 + 1/4?", "3/4", "LCD is 4: 2/4 + 1/4 = 3/4"),
        ]
    }

    fn multiply_divide_fractions(&mut self) -> Vec<Question> {
        vec![
            self.mcq_text("1/2 × 1/3 = ?", &["1/6", "2/5", "1/5", "2/6"], Some("Multiply tops, multiply bottoms")),
            self.mcq_text("2/3 × 3/4 = ?", &["1/2", "6/7", "5/12", "2/4"], Some("6/12 = 1/2")),
            self.mcq_text("3/5 × 2/3 = ?", &["2/5", "5/8", "6/15", "1/5"], Some("6/15 = 2/5")),
            self.mcq_text("4 × 1/3 = ?", &["4/3", "4/1", "1/12", "3/4"], Some("Write 4 as 4/1, then multiply")),
            self.mcq_text("1/2 ÷ 1/4 = ?", &["2", "1/8", "1/2", "4"], Some("Flip the second fraction and multiply: 1/2 × 4/1")),
            self.mcq_text("3/4 ÷ 1/2 = ?", &["3/2", "3/8", "1/2", "6/4"], Some("Flip & multiply: 3/4 × 2/1")),
            self.mcq_text("2/5 ÷ 3/5 = ?", &["2/3", "6/25", "6/5", "5/3"], Some("Flip & multiply: 2/5 × 5/3")),
            self.mcq_text(
                "A recipe needs 3/4 cup of sugar. You want to make half the recipe. How much sugar?",
                &["3/8 cup", "1/4 cup", "3/2 cups", "1/2 cup"],
                Some("3/4 × 1/2 = 3/8"),
            ),
            self.mcq_text(
                "You have 6 pizzas. Each person eats 3/4 of a pizza. How many people can eat?",
                &["8", "6", "4", "9"],
                Some("6 ÷ 3/4 = 6 × 4/3 = 8"),
            ),
            self.typein_text("What is 1/3 × 1/3?", "1/9", "Multiply tops and bottoms"),
            self.typein_text("What is 1/2 ÷ 1/3?", "3/2", "Flip & multiply: 1/2 × 3/1"),
        ]
    }

    fn decimals(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        // operands and sums in tenths
        for _ in 0..3 {
            let a: i64 = self.rng.gen_range(10..=99);
            let b: i64 = self.rng.gen_range(10..=99);
            let sum = a + b;
            qs.push(self.mcq_choices(
                format!("{} + {} = ?", tenths(a), tenths(b)),
                tenths(sum),
                vec![tenths(sum + 1), tenths(sum - 1), tenths(sum + 10)],
                Some("Line up the decimal points".to_string()),
            ));
        }
        qs.push(self.mcq_text("0.3 × 0.4 = ?", &["0.12", "1.2", "0.7", "0.07"], Some("Multiply 3 × 4 = 12, count decimal places")));
        qs.push(self.mcq_text("1.5 × 4 = ?", &["6", "5.4", "6.5", "4.5"], None));
        qs.push(self.mcq_text("2.5 × 0.2 = ?", &["0.5", "0.05", "5.0", "0.52"], None));
        qs.push(self.mcq_text("Convert 3/4 to a decimal", &["0.75", "0.34", "0.7", "0.43"], None));
        qs.push(self.mcq_text("Convert 1/5 to a decimal", &["0.2", "0.15", "0.5", "0.25"], None));
        qs.push(self.mcq_text("Convert 0.6 to a fraction", &["3/5", "6/10", "1/6", "2/3"], Some("0.6 = 6/10 = 3/5")));
        qs.push(self.mcq_text("Convert 0.25 to a fraction", &["1/4", "1/25", "2/5", "25/10"], None));
        qs.push(self.mcq_text("Which is greatest: 0.45, 0.5, or 0.405?", &["0.5", "0.45", "0.405"], None));
        qs.push(self.mcq_text("Which is smallest: 0.8, 0.08, or 0.78?", &["0.08", "0.78", "0.8"], None));
        qs
    }

    fn ratios(&mut self) -> Vec<Question> {
        vec![
            self.mcq_text(
                "In a class of 10 boys and 15 girls, what is the ratio of boys to girls?",
                &["2:3", "10:15", "3:2", "1:5"],
                Some("Simplify 10:15 by dividing both by 5"),
            ),
            self.mcq_text("Simplify the ratio 12:8", &["3:2", "12:8", "4:3", "6:4"], None),
            self.mcq_text(
                "A recipe uses 2 cups flour for 3 cups milk. How much flour for 9 cups milk?",
                &["6 cups", "4 cups", "5 cups", "3 cups"],
                Some("2/3 = ?/9, so ? = 6"),
            ),
            self.mcq_text("Simplify the ratio 20:30:10", &["2:3:1", "4:6:2", "20:30:10", "10:15:5"], None),
            self.mcq_text(
                "If the ratio of cats to dogs is 3:5 and there are 15 cats, how many dogs?",
                &["25", "20", "30", "10"],
                Some("3/5 = 15/?, so ? = 25"),
            ),
            self.mcq_text("You drive 180 miles in 3 hours. What is the unit rate?", &["60 mph", "90 mph", "45 mph", "180 mph"], None),
            self.mcq_text("12 apples cost $4. What is the cost per apple?", &["$0.33", "$3.00", "$0.25", "$0.50"], Some("$4 ÷ 12 ≈ $0.33")),
            self.mcq_text(
                "You earn $45 for 5 hours of work. What is your hourly rate?",
                &["$9/hour", "$5/hour", "$8/hour", "$10/hour"],
                None,
            ),
            self.mcq_text("Which ratio is equivalent to 4:6?", &["2:3", "3:4", "4:3", "8:10"], None),
            self.mcq_text("Which ratio is NOT equivalent to 1:2?", &["3:5", "2:4", "5:10", "3:6"], None),
        ]
    }

    fn proportions(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for (a, b, c, d) in [(2, 5, 6, 15), (3, 4, 9, 12), (1, 3, 5, 15), (4, 7, 8, 14), (2, 3, 10, 15)] {
            qs.push(self.mcq(
                format!("Solve: {a}/{b} = {c}/x"),
                d,
                [d + 1, d - 2, b * 2],
                format!("Cross multiply: {a} × x = {b} × {c}, so x = {d}"),
            ));
        }
        qs.push(self.mcq_text("If 3 notebooks cost $6, how much do 7 notebooks cost?", &["$14", "$12", "$18", "$21"], Some("3/6 = 7/x, so x = 14")));
        qs.push(self.mcq_text(
            "A map scale is 1 inch = 50 miles. Two cities are 4.5 inches apart. How far apart are they?",
            &["225 miles", "200 miles", "250 miles", "180 miles"],
            None,
        ));
        qs.push(self.mcq_text(
            "If 5 pounds of apples make 2 pies, how many pounds for 6 pies?",
            &["15 pounds", "12 pounds", "10 pounds", "18 pounds"],
            Some("5/2 = x/6, so x = 15"),
        ));
        qs.push(self.typein_text("Solve: 4/6 = x/9", "6", "Cross multiply: 4 × 9 = 6 × x"));
        qs.push(self.typein_text("Solve: 5/8 = 15/x", "24", "Cross multiply: 5x = 8 × 15 = 120"));
        qs.push(self.typein_text("If 2 tickets cost $14, how much do 5 tickets cost?", "35", "2/14 = 5/x, so x = 35"));
        qs
    }

    fn percentages(&mut self) -> Vec<Question> {
        vec![
            self.mcq_text("What is 50% of 80?", &["40", "30", "45", "50"], None),
            self.mcq_text("What is 25% of 60?", &["15", "20", "12", "25"], None),
            self.mcq_text("What is 10% of 250?", &["25", "250", "2.5", "50"], None),
            self.mcq_text("What is 75% of 200?", &["150", "175", "125", "100"], None),
            self.mcq_text("What is 20% of 45?", &["9", "8", "10", "12"], None),
            self.mcq_text("Convert 3/5 to a percent", &["60%", "35%", "53%", "65%"], Some("3 ÷ 5 = 0.6 = 60%")),
            self.mcq_text("Convert 0.35 to a percent", &["35%", "3.5%", "0.35%", "350%"], None),
            self.mcq_text("A $40 shirt is 25% off. What is the sale price?", &["$30", "$35", "$25", "$10"], Some("25% of $40 = $10 discount")),
            self.mcq_text("A $20 meal with a 15% tip. What is the total?", &["$23", "$22", "$25", "$21"], Some("15% of $20 = $3")),
            self.mcq_text("You got 18 out of 20 correct. What percent?", &["90%", "80%", "85%", "95%"], Some("18/20 = 0.9 = 90%")),
            self.typein_text("What is 30% of 50?", "15", "30% = 0.30; 0.30 × 50 = 15"),
        ]
    }

    fn area_perimeter(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..3 {
            let l: i64 = self.rng.gen_range(3..=15);
            let w: i64 = self.rng.gen_range(3..=15);
            qs.push(self.mcq(
                format!("What is the area of a rectangle with length {l} and width {w}?"),
                l * w,
                [l + w, 2 * (l + w), l * w + l],
                format!("Area = length × width = {l} × {w}"),
            ));
            qs.push(self.mcq(
                format!("What is the perimeter of a rectangle: length {l}, width {w}?"),
                2 * (l + w),
                [l * w, l + w, 2 * l + w],
                format!("Perimeter = 2(l + w) = 2({l} + {w})"),
            ));
        }
        // even bases keep the area whole
        for _ in 0..2 {
            let b: i64 = 2 * self.rng.gen_range(2..=6);
            let h: i64 = self.rng.gen_range(3..=10);
            let area = b * h / 2;
            qs.push(self.mcq(
                format!("What is the area of a triangle with base {b} and height {h}?"),
                area,
                [b * h, b + h, area + b],
                "Area = (1/2) × base × height".to_string(),
            ));
        }
        qs.push(self.mcq_text(
            "What is the area of a circle with radius 5? (use π ≈ 3.14)",
            &["78.5", "31.4", "15.7", "25"],
            Some("A = πr² = 3.14 × 25"),
        ));
        qs.push(self.mcq_text(
            "What is the circumference of a circle with radius 7? (use π ≈ 3.14)",
            &["43.96", "21.98", "153.86", "14"],
            Some("C = 2πr = 2 × 3.14 × 7"),
        ));
        qs
    }

    fn volume(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..4 {
            let l: i64 = self.rng.gen_range(2..=10);
            let w: i64 = self.rng.gen_range(2..=10);
            let h: i64 = self.rng.gen_range(2..=10);
            let v = l * w * h;
            qs.push(self.mcq(
                format!("Volume of a rectangular box: length {l}, width {w}, height {h}?"),
                v,
                [l * w + h, l + w + h, v + l],
                format!("V = l × w × h = {l} × {w} × {h}"),
            ));
        }
        for _ in 0..3 {
            let s: i64 = self.rng.gen_range(2..=8);
            let v = s.pow(3);
            qs.push(self.mcq(
                format!("What is the volume of a cube with side length {s}?"),
                v,
                [s * s, s * 6, v + s],
                format!("V = s³ = {s} × {s} × {s}"),
            ));
        }
        qs.push(self.mcq_text(
            "The formula for volume of a rectangular prism is:",
            &["V = l × w × h", "V = l + w + h", "V = 2(lw + lh + wh)", "V = l × w"],
            None,
        ));
        qs.push(self.mcq_text("The formula for volume of a cube is:", &["V = s³", "V = 6s²", "V = s²", "V = 4s"], None));
        qs.push(self.mcq_text(
            "A fish tank is 20 in long, 10 in wide, and 12 in tall. What is its volume?",
            &["2,400 cubic in", "420 cubic in", "1,200 cubic in", "240 cubic in"],
            None,
        ));
        qs.push(self.mcq_text("A cube has a volume of 64. What is the side length?", &["4", "8", "16", "32"], Some("4 × 4 × 4 = 64")));
        qs
    }

    fn angles(&mut self) -> Vec<Question> {
        let mut qs = vec![
            self.mcq_text("An angle of 90° is called:", &["Right angle", "Acute angle", "Obtuse angle", "Straight angle"], None),
            self.mcq_text("An angle less than 90° is called:", &["Acute angle", "Right angle", "Obtuse angle", "Reflex angle"], None),
            self.mcq_text(
                "An angle between 90° and 180° is called:",
                &["Obtuse angle", "Acute angle", "Right angle", "Straight angle"],
                None,
            ),
            self.mcq_text("A straight angle measures:", &["180°", "90°", "360°", "270°"], None),
            self.mcq_text("The three angles of a triangle always add up to:", &["180°", "360°", "90°", "270°"], None),
        ];
        for _ in 0..3 {
            let a: i64 = self.rng.gen_range(30..=80);
            let b: i64 = self.rng.gen_range(30..=80);
            let c = 180 - a - b;
            qs.push(self.mcq_choices(
                format!("A triangle has angles of {a}° and {b}°. What is the third angle?"),
                format!("{c}°"),
                vec![format!("{}°", c + 10), format!("{}°", c - 10), format!("{}°", 180 - a)],
                Some(format!("180 - {a} - {b} = {c}")),
            ));
        }
        qs.push(self.mcq_text("A triangle with all sides equal is called:", &["Equilateral", "Isosceles", "Scalene", "Right"], None));
        qs.push(self.mcq_text(
            "A triangle with exactly two equal sides is called:",
            &["Isosceles", "Equilateral", "Scalene", "Obtuse"],
            None,
        ));
        qs.push(self.mcq_text("Two angles that add to 90° are called:", &["Complementary", "Supplementary", "Adjacent", "Vertical"], None));
        qs.push(self.mcq_text("Two angles that add to 180° are called:", &["Supplementary", "Complementary", "Adjacent", "Congruent"], None));
        qs.push(self.typein_text("What is the supplement of a 65° angle?", "115", "180 - 65 = 115"));
        qs.push(self.typein_text("What is the complement of a 35° angle?", "55", "90 - 35 = 55"));
        qs
    }

    fn mean_median_mode(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..3 {
            let mut nums: Vec<i64> = (0..5).map(|_| self.rng.gen_range(1..=20)).collect();
            nums.sort_unstable();
            let sum: i64 = nums.iter().sum();
            let listed = join(&nums);
            // five values, so the mean in tenths is sum * 2
            let mean = tenths_trimmed(sum * 2);
            qs.push(self.mcq_choices(
                format!("Find the mean (average) of: {listed}"),
                mean.clone(),
                vec![tenths_trimmed(sum * 2 + 10), nums[2].to_string(), tenths_trimmed(sum * 2 - 20)],
                Some(format!("Add all numbers ({sum}) and divide by {}", nums.len())),
            ));
            qs.push(self.mcq_choices(
                format!("Find the median of: {listed}"),
                nums[2].to_string(),
                vec![nums[1].to_string(), nums[3].to_string(), mean],
                Some("The median is the middle value when sorted".to_string()),
            ));
        }
        qs.push(self.mcq_text(
            "Find the mode of: 3, 5, 3, 7, 3, 8, 5",
            &["3", "5", "7", "8"],
            Some("The mode is the value that appears most often"),
        ));
        qs.push(self.mcq_text("Find the mode of: 2, 4, 4, 6, 6, 8", &["4 and 6", "4", "6", "2"], Some("Both 4 and 6 appear twice")));
        for _ in 0..2 {
            let mut nums: Vec<i64> = (0..5).map(|_| self.rng.gen_range(1..=30)).collect();
            nums.sort_unstable();
            let range = nums[4] - nums[0];
            qs.push(self.mcq(
                format!("Find the range of: {}", join(&nums)),
                range,
                [range + 2, range - 1, nums[2]],
                "Range = biggest number - smallest number".to_string(),
            ));
        }
        qs
    }

    fn probability(&mut self) -> Vec<Question> {
        vec![
            self.mcq_text("What is the probability of rolling a 3 on a regular die?", &["1/6", "1/3", "1/2", "3/6"], None),
            self.mcq_text("What is the probability of flipping heads on a coin?", &["1/2", "1/4", "1/3", "2/3"], None),
            self.mcq_text(
                "What is the probability of rolling an even number on a die?",
                &["1/2", "1/3", "1/6", "2/3"],
                Some("Even numbers: 2, 4, 6 = 3 out of 6"),
            ),
            self.mcq_text(
                "A bag has 3 red and 5 blue marbles. What is the probability of picking red?",
                &["3/8", "5/8", "3/5", "1/3"],
                None,
            ),
            self.mcq_text(
                "A bag has 4 red, 2 blue, and 4 green marbles. Probability of picking blue?",
                &["1/5", "2/4", "2/8", "1/10"],
                Some("2 out of 10 = 1/5"),
            ),
            self.mcq_text("If probability of rain is 30%, what is the probability of no rain?", &["70%", "30%", "50%", "60%"], None),
            self.mcq_text(
                "A spinner has 4 equal sections: red, blue, green, yellow. P(green)?",
                &["1/4", "1/2", "1/3", "1/6"],
                None,
            ),
            self.mcq_text("What is the probability of an impossible event?", &["0", "1", "1/2", "undefined"], None),
            self.mcq_text("What is the probability of a certain event?", &["1", "0", "1/2", "2"], None),
            self.mcq_text("You flip a coin twice. What is P(two heads)?", &["1/4", "1/2", "1/3", "1/8"], Some("P(H) × P(H) = 1/2 × 1/2")),
            self.typein_text("A bag has 6 red and 4 blue. How many marbles total?", "10", "Just add them up!"),
        ]
    }

    fn coordinate_plane(&mut self) -> Vec<Question> {
        vec![
            self.mcq_text(
                "In an ordered pair (x, y), which number comes first?",
                &["x (horizontal)", "y (vertical)", "Either one", "The larger number"],
                None,
            ),
            self.mcq_text("The point (0, 0) is called the:", &["Origin", "Center", "Axis", "Vertex"], None),
            self.mcq_text(
                "Which quadrant is the point (3, -2) in?",
                &["Quadrant IV", "Quadrant I", "Quadrant II", "Quadrant III"],
                Some("Positive x, negative y = Quadrant IV"),
            ),
            self.mcq_text("Which quadrant is (-4, 5) in?", &["Quadrant II", "Quadrant I", "Quadrant III", "Quadrant IV"], None),
            self.mcq_text("The point (5, 0) is on which axis?", &["x-axis", "y-axis", "Both axes", "Neither axis"], None),
            self.mcq_text("The point (0, -3) is on which axis?", &["y-axis", "x-axis", "Both axes", "Neither axis"], None),
            self.mcq_text(
                "What is the distance between (1, 2) and (4, 2)?",
                &["3", "5", "2", "6"],
                Some("Same y, so just subtract x values: 4 - 1 = 3"),
            ),
            self.mcq_text(
                "What is the distance between (3, 1) and (3, 7)?",
                &["6", "4", "10", "3"],
                Some("Same x, so subtract y values: 7 - 1 = 6"),
            ),
            self.mcq_text("If you reflect (2, 5) across the x-axis, you get:", &["(2, -5)", "(-2, 5)", "(-2, -5)", "(5, 2)"], None),
            self.mcq_text("If you reflect (3, -1) across the y-axis, you get:", &["(-3, -1)", "(3, 1)", "(-3, 1)", "(1, -3)"], None),
            self.typein_text("What quadrant is (-2, -7) in? (Answer: 1, 2, 3, or 4)", "3", "Both negative = Quadrant III"),
        ]
    }

    fn integers(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..4 {
            let a: i64 = self.rng.gen_range(-15..=15);
            let b: i64 = self.rng.gen_range(-15..=-1);
            let sum = a + b;
            let hint = format!("Adding {b} is the same as moving {} steps left", -b);
            qs.push(self.mcq(format!("{a} + ({b}) = ?"), sum, [a - b, -sum, sum + 2], hint));
        }
        for _ in 0..3 {
            let a: i64 = self.rng.gen_range(-10..=10);
            let b: i64 = self.rng.gen_range(-10..=-1);
            let diff = a - b;
            let hint = format!("Subtracting {b} is the same as adding {}", -b);
            qs.push(self.typein(format!("{a} - ({b}) = ?"), diff, hint));
        }
        for _ in 0..3 {
            let a: i64 = self.rng.gen_range(-9..=-2);
            let b: i64 = self.rng.gen_range(2..=9);
            let product = a * b;
            qs.push(self.mcq(format!("{a} × {b} = ?"), product, [-product, product - b, a + b], "Negative × positive = negative".to_string()));
        }
        qs.push(self.mcq("What is |-8|?".to_string(), 8, [-8, 0, 1], "Absolute value is the distance from 0".to_string()));
        qs
    }

    fn order_of_operations(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..4 {
            let a: i64 = self.rng.gen_range(2..=12);
            let b: i64 = self.rng.gen_range(2..=9);
            let c: i64 = self.rng.gen_range(2..=9);
            let answer = a + b * c;
            let hint = format!("Multiply first: {a} + {} = {answer}", b * c);
            qs.push(self.mcq(format!("{a} + {b} × {c} = ?"), answer, [(a + b) * c, a * b + c, answer + 1], hint));
        }
        for _ in 0..3 {
            let a: i64 = self.rng.gen_range(2..=9);
            let b: i64 = self.rng.gen_range(2..=9);
            let c: i64 = self.rng.gen_range(2..=6);
            let answer = (a + b) * c;
            let hint = format!("Parentheses first: {} × {c} = {answer}", a + b);
            qs.push(self.typein(format!("({a} + {b}) × {c} = ?"), answer, hint));
        }
        qs.push(self.mcq("2 + 3² = ?".to_string(), 11, [25, 10, 7], "Exponents first: 2 + 9 = 11".to_string()));
        qs.push(self.mcq("12 ÷ 4 + 2 × 3 = ?".to_string(), 9, [3, 15, 12], "Left to right: 3 + 6 = 9".to_string()));
        qs.push(self.mcq("10 - 2 × 3 = ?".to_string(), 4, [24, 8, 16], "Multiply first: 10 - 6 = 4".to_string()));
        qs
    }

    fn simple_equations(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..3 {
            let x: i64 = self.rng.gen_range(1..=20);
            let a: i64 = self.rng.gen_range(1..=15);
            let b = x + a;
            qs.push(self.mcq(format!("Solve for x: x + {a} = {b}"), x, [x + 1, x - 1, b], format!("Subtract {a} from both sides")));
        }
        for _ in 0..3 {
            let x: i64 = self.rng.gen_range(2..=12);
            let a: i64 = self.rng.gen_range(2..=8);
            let b = a * x;
            qs.push(self.mcq(format!("Solve for x: {a}x = {b}"), x, [x + 1, b, a], format!("Divide both sides by {a}")));
        }
        for _ in 0..2 {
            let x: i64 = self.rng.gen_range(2..=10);
            let a: i64 = self.rng.gen_range(2..=5);
            let b: i64 = self.rng.gen_range(1..=10);
            let c = a * x + b;
            qs.push(self.mcq(
                format!("Solve for x: {a}x + {b} = {c}"),
                x,
                [x + 1, x - 1, c],
                format!("Subtract {b}, then divide by {a}"),
            ));
        }
        qs.push(self.typein("Solve: x + 7 = 15".to_string(), 8, "Subtract 7 from both sides".to_string()));
        qs.push(self.typein("Solve: 3x = 21".to_string(), 7, "Divide both sides by 3".to_string()));
        qs
    }

    fn exponents(&mut self) -> Vec<Question> {
        let mut qs = Vec::new();
        for _ in 0..5 {
            let base: i64 = self.rng.gen_range(2..=10);
            let exp: u32 = self.rng.gen_range(2..=4);
            let result = base.pow(exp);
            let expanded = vec![base.to_string(); exp as usize].join(" × ");
            qs.push(self.mcq(
                format!("What is {base}^{exp}?"),
                result,
                [result + base, base * i64::from(exp), result - 1],
                format!("{base}^{exp} means {expanded}"),
            ));
        }
        for root in [2i64, 3, 5, 6, 8, 10, 12] {
            let square = root * root;
            qs.push(self.mcq(
                format!("What is √{square}?"),
                root,
                [root + 1, root - 1, square / 2],
                format!("{root} × {root} = {square}"),
            ));
        }
        qs.push(self.mcq_text("Any number raised to the power of 0 equals:", &["1", "0", "The number itself", "undefined"], None));
        qs.push(self.typein("What is 2^5?".to_string(), 32, "2 × 2 × 2 × 2 × 2 = 32".to_string()));
        qs
    }
}

impl QuestionGenerator for ProceduralGenerator {
    fn generate(&mut self, topic_id: &str, count: usize) -> Vec<Question> {
        let mut bank = match topic_id {
            "multiplication" => self.multiplication(),
            "division" => self.division(),
            "factors-multiples" => self.factors_multiples(),
            "fraction-basics" => self.fraction_basics(),
            "add-sub-fractions" => self.add_sub_fractions(),
            "multiply-divide-fractions" => self.multiply_divide_fractions(),
            "decimals" => self.decimals(),
            "ratios" => self.ratios(),
            "proportions" => self.proportions(),
            "percentages" => self.percentages(),
            "area-perimeter" => self.area_perimeter(),
            "volume" => self.volume(),
            "angles" => self.angles(),
            "mean-median-mode" => self.mean_median_mode(),
            "probability" => self.probability(),
            "coordinate-plane" => self.coordinate_plane(),
            "integers" => self.integers(),
            "order-of-operations" => self.order_of_operations(),
            "simple-equations" => self.simple_equations(),
            "exponents" => self.exponents(),
            _ => {
                log::debug!("[QUESTIONS] no procedural bank for topic:{}", topic_id);
                return Vec::new();
            }
        };

        bank.shuffle(&mut self.rng);
        bank.truncate(count);
        bank
    }
}

/// Tenths as a one-decimal string: 47 -> "4.7"
fn tenths(v: i64) -> String {
    let sign = if v < 0 { "-" } else { "" };
    format!("{sign}{}.{}", v.abs() / 10, v.abs() % 10)
}

/// Like `tenths`, without the ".0" on whole values
fn tenths_trimmed(v: i64) -> String {
    if v % 10 == 0 {
        (v / 10).to_string()
    } else {
        tenths(v)
    }
}

fn join(nums: &[i64]) -> String {
    nums.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a * b).abs() / gcd(a, b)
}
