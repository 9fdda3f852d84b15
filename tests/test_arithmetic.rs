use gaforge::{
    chromosome::{Binary, BinaryChromosome, Chromosome},
    evaluation::EvaluationBackend,
    evolution::{EvolutionLauncher, EvolutionOptions},
    rng::RandomNumberGenerator,
    Solution,
};

const CODING: &[u8] = b"0123456789+-*/??";
const CHAR_BITS: usize = 4;

/// An expression of single digits and operators, four bits per character.
#[derive(Clone, Debug)]
struct ArithmeticExpression {
    length: usize,
    expression: String,
}

impl ArithmeticExpression {
    fn new(length: usize) -> Self {
        Self {
            length,
            expression: String::new(),
        }
    }
}

impl Solution for ArithmeticExpression {
    type Alphabet = Binary;

    fn initialize_chromosome(&self, rng: &mut RandomNumberGenerator) -> BinaryChromosome {
        Chromosome::initialize(self.length * CHAR_BITS, Binary, rng)
    }

    fn encode(&self) -> BinaryChromosome {
        let genes = self
            .expression
            .bytes()
            .flat_map(|c| {
                let code = CODING.iter().position(|&x| x == c).unwrap_or(14);
                (0..CHAR_BITS).rev().map(move |bit| ((code >> bit) & 1) as u8)
            })
            .collect();
        Chromosome::from_genes(Binary, genes).unwrap()
    }

    fn decode(&mut self, chromosome: &BinaryChromosome) {
        self.expression = decode_expression(chromosome.genes());
    }
}

fn decode_expression(genes: &[u8]) -> String {
    genes
        .chunks(CHAR_BITS)
        .map(|chunk| {
            let code = chunk.iter().fold(0usize, |acc, &bit| (acc << 1) | bit as usize);
            CODING[code] as char
        })
        .collect()
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

/// Applies operators left to right without precedence, skipping characters
/// that break the digit/operator alternation. Division by zero is skipped.
fn evaluate(expression: &str) -> i64 {
    let mut result = 0i64;
    let mut operator = '+';
    let mut digit_next = true;

    for c in expression.chars() {
        if digit_next {
            if let Some(digit) = c.to_digit(10) {
                let digit = digit as i64;
                match operator {
                    '+' => result += digit,
                    '-' => result -= digit,
                    '*' => result *= digit,
                    '/' if digit != 0 => result = result.div_euclid(digit),
                    _ => {}
                }
                digit_next = false;
            }
        } else if is_operator(c) {
            operator = c;
            digit_next = true;
        }
    }
    result
}

/// Number of characters that are out of place, plus one if the expression
/// does not end on a digit.
fn layout_errors(expression: &str) -> usize {
    let mut in_place = 0usize;
    let mut digit_next = true;

    for c in expression.chars() {
        if digit_next && c.is_ascii_digit() {
            in_place += 1;
            digit_next = false;
        } else if !digit_next && is_operator(c) {
            in_place += 1;
            digit_next = true;
        }
    }

    let length = expression.chars().count();
    if digit_next {
        length + 1 - in_place
    } else {
        length - in_place
    }
}

fn expression_fitness(target: i64, genes: &[u8]) -> f64 {
    let expression = decode_expression(genes);
    let diff = (target - evaluate(&expression)).abs() as f64;
    1.0 / (1.0 + diff + layout_errors(&expression) as f64)
}

#[test]
fn test_expression_evaluates_left_to_right() {
    assert_eq!(evaluate("2+3*4"), 20);
    assert_eq!(evaluate("9-3/2"), 3);
    assert_eq!(evaluate("22+?-72"), 9);
    assert_eq!(evaluate("8/0+1"), 9);
    assert_eq!(evaluate("1-8/3"), -3);
}

#[test]
fn test_layout_errors() {
    assert_eq!(layout_errors("1+2*3/4"), 0);
    assert_eq!(layout_errors("1+2*"), 1);
    assert_eq!(layout_errors("?23+-1?"), 4);
    assert_eq!(layout_errors("??"), 3);
}

#[test]
fn test_encode_decode_agree() {
    let mut solution = ArithmeticExpression::new(5);
    solution.expression = "7*2+0".to_string();
    let chromosome = solution.encode();
    assert_eq!(chromosome.len(), 20);

    let mut decoded = ArithmeticExpression::new(5);
    decoded.decode(&chromosome);
    assert_eq!(decoded.expression, "7*2+0");
    assert_eq!(expression_fitness(14, chromosome.genes()), 1.0);
}

#[test]
fn test_evolves_towards_target() {
    let target = 14;
    let mut improved = false;
    let mut close = false;

    for seed in 0..5 {
        let options = EvolutionOptions::builder()
            .population_size(60)
            .elite_size(6)
            .crossover_rate(0.8)
            .mutation_rate(0.01)
            .max_iterations(200)
            .backend(EvaluationBackend::ThreadPool)
            .worker_count(2)
            .seed(seed)
            .build();

        let launcher = EvolutionLauncher::<ArithmeticExpression>::builder()
            .with_options(options)
            .with_factory(|| ArithmeticExpression::new(7))
            .with_fitness_task(move |genes: &[u8]| expression_fitness(target, genes))
            .build()
            .unwrap();

        let mut best = Vec::new();
        for step in launcher.run().unwrap() {
            let (population, _) = step.unwrap();
            let leader = population.best_individual().unwrap();
            assert_eq!(leader.solution().expression.len(), 7);
            best.push(leader.fitness().unwrap());
        }

        assert!(best.iter().all(|&f| f > 0.0 && f <= 1.0));
        assert!(best.windows(2).all(|pair| pair[1] >= pair[0]));
        improved |= best.last() > best.first();
        close |= *best.last().unwrap() >= 0.5;
    }

    assert!(improved);
    assert!(close);
}
