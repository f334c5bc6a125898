use rs_markov_core::model::node::{HEADER, TRAILER};
use rs_markov_core::{ChainError, MarkovChain, Tokenizer};

fn words(phrase: &str) -> Vec<String> {
	phrase.split(' ').map(str::to_owned).collect()
}

#[test]
fn two_phrases_share_a_prefix() {
	let mut chain = MarkovChain::with_seed(1, 7).unwrap();
	chain.add_phrase(&words("a b c")).unwrap();
	chain.add_phrase(&words("a b d")).unwrap();

	assert_eq!(chain.node_count(), 4);
	assert_eq!(chain.graph().total_node_count(), 6);
	assert_eq!(chain.start_weight(&words("a")), Some(2));
	assert_eq!(chain.weight_between(&words("a"), &words("b")), Some(2));
	assert_eq!(chain.weight_between(&words("b"), &words("c")), Some(1));
	assert_eq!(chain.weight_between(&words("b"), &words("d")), Some(1));

	let mut seen_c = false;
	let mut seen_d = false;
	for _ in 0..200 {
		let phrase = chain.make_phrase().unwrap();
		assert_eq!(&phrase[..2], &words("a b")[..]);
		assert_eq!(phrase.len(), 3);
		match phrase[2].as_str() {
			"c" => seen_c = true,
			"d" => seen_d = true,
			other => panic!("unexpected ending {other}"),
		}
	}
	assert!(seen_c && seen_d);
}

#[test]
fn single_path_is_deterministic() {
	let mut chain = MarkovChain::new(1).unwrap();
	chain.add_phrase(&words("x y z")).unwrap();
	for _ in 0..20 {
		assert_eq!(chain.make_phrase().unwrap(), words("x y z"));
	}
}

#[test]
fn relearning_doubles_weights_only() {
	let phrase = words("the cat sat on the mat and the cat slept");
	for order in 1..=4 {
		let mut chain = MarkovChain::with_seed(order, 1).unwrap();
		chain.add_phrase(&phrase).unwrap();

		let nodes = chain.node_count();
		let edges = chain.edge_count();
		assert!(nodes <= phrase.len().div_ceil(order), "order {order}: {nodes} nodes");

		let weights: Vec<Vec<u32>> = chain
			.graph()
			.nodes()
			.iter()
			.map(|node| node.edges().iter().map(|edge| edge.weight).collect())
			.collect();

		chain.add_phrase(&phrase).unwrap();
		assert_eq!(chain.node_count(), nodes);
		assert_eq!(chain.edge_count(), edges);

		for (node, before) in chain.graph().nodes().iter().zip(&weights) {
			let after: Vec<u32> = node.edges().iter().map(|edge| edge.weight).collect();
			let doubled: Vec<u32> = before.iter().map(|w| w * 2).collect();
			assert_eq!(after, doubled, "order {order}, node {}", node.id());
		}
	}
}

#[test]
fn weighted_choice_is_unbiased() {
	let mut chain = MarkovChain::with_seed(1, 1234).unwrap();
	chain.add_phrase(&words("a b")).unwrap();
	for _ in 0..3 {
		chain.add_phrase(&words("a c")).unwrap();
	}

	let a = chain.graph().node_id(&words("a")).unwrap();
	let b = chain.graph().node_id(&words("b")).unwrap();
	let c = chain.graph().node_id(&words("c")).unwrap();

	let (mut hits_b, mut hits_c) = (0u32, 0u32);
	for _ in 0..40_000 {
		match chain.next_node(a).unwrap() {
			Some(id) if id == b => hits_b += 1,
			Some(id) if id == c => hits_c += 1,
			other => panic!("unexpected successor {other:?}"),
		}
	}

	let ratio = f64::from(hits_c) / f64::from(hits_b);
	assert!((2.7..3.3).contains(&ratio), "ratio was {ratio}");
}

#[test]
fn bounded_generation_stays_near_budget() {
	let mut chain = MarkovChain::with_seed(2, 99).unwrap();
	chain.add_phrase(&words("a b c d e f g h i j k l")).unwrap();
	chain.add_phrase(&words("g h e f c d")).unwrap();
	// Every pair can also close a phrase, so the trailer is one hop away
	for pair in ["a b", "c d", "e f", "g h", "i j", "k l"] {
		chain.add_phrase(&words(pair)).unwrap();
	}

	for max_length in 1..8 {
		for _ in 0..100 {
			let phrase = chain.make_bounded_phrase(max_length).unwrap();
			assert!(!phrase.is_empty());
			assert!(phrase.len() <= max_length + chain.order(), "{max_length}: {phrase:?}");
		}
	}
}

#[test]
fn gradual_bounded_generation_counts_across_loops() {
	let mut chain = MarkovChain::with_seed(1, 5).unwrap();
	chain.add_phrase(&words("a b c d e f")).unwrap();
	chain.add_phrase(&words("a f")).unwrap();

	// Budget reached inside the first phrase: every later phrase takes the shortcut
	let mut out = Vec::new();
	for _ in 0..12 {
		out.push(chain.next_with(true, 3).unwrap().unwrap());
	}
	let tail: Vec<String> = out.iter().skip(6).cloned().collect();
	assert_eq!(tail, words("a f a f a f"));
}

#[test]
fn clear_returns_to_sentinels() {
	let mut chain = MarkovChain::with_seed(1, 8).unwrap();
	Tokenizer::alphanumeric().learn(&mut chain, "one fish. two fish. red fish!").unwrap();
	assert!(chain.node_count() > 0);

	chain.clear();
	assert_eq!(chain.node_count(), 0);
	assert_eq!(chain.edge_count(), 0);
	assert!(chain.graph().node(HEADER).unwrap().edges().is_empty());
	assert!(chain.graph().node(TRAILER).unwrap().edges().is_empty());
	assert!(chain.make_phrase().unwrap().is_empty());
	assert_eq!(chain.next().unwrap(), None);
}

#[test]
fn trailer_never_gets_edges() {
	let mut chain = MarkovChain::with_seed(3, 8).unwrap();
	for phrase in ["a b c d", "d c b a", "a", "b c"] {
		chain.add_phrase(&words(phrase)).unwrap();
	}
	assert!(chain.graph().node(TRAILER).unwrap().edges().is_empty());
	for node in chain.graph().nodes() {
		assert!(node.len() <= 3);
		assert!(node.edges().iter().all(|edge| edge.weight >= 1));
	}
}

#[test]
fn invalid_order() {
	let err = MarkovChain::<u8>::new(0).unwrap_err();
	assert!(matches!(err, ChainError::InvalidOrder(0)));
	assert_eq!(err.to_string(), "invalid tuple order 0, must be >= 1");
}
