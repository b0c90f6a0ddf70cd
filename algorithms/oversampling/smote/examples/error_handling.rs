//! Example demonstrating error handling with the SMOTE sampler.
//!
//! Each section triggers one error condition and shows how to match on it,
//! then runs a successful resampling.

use ndarray::array;
use smote::{SamplingStrategy, Smote, SmoteError};
use smote_helpers::{DataPoint, L2Dist};

fn main() {
    println!("SMOTE Error Handling Examples");
    println!("=============================");

    let data = vec![
        DataPoint::new(array![1.0, 1.0], "minority"),
        DataPoint::new(array![2.0, 2.0], "minority"),
        DataPoint::new(array![1.0, 2.0], "minority"),
        DataPoint::new(array![2.0, 1.0], "minority"),
        DataPoint::new(array![8.0, 8.0], "majority"),
        DataPoint::new(array![9.0, 8.0], "majority"),
        DataPoint::new(array![8.0, 9.0], "majority"),
        DataPoint::new(array![9.0, 9.0], "majority"),
        DataPoint::new(array![8.5, 8.5], "majority"),
        DataPoint::new(array![7.5, 8.5], "majority"),
    ];

    println!("\n1. Handling k = 0:");
    match Smote::new(0, L2Dist).fit_resample(&data) {
        Err(SmoteError::InvalidK) => println!("   ✓ Caught expected error: {}", SmoteError::InvalidK),
        other => println!("   ✗ Unexpected result: {:?}", other),
    }

    println!("\n2. Handling a k too large for the minority class:");
    match Smote::new(3, L2Dist).fit_resample(&data) {
        Err(e @ SmoteError::NotEnoughNeighbors { .. }) => println!("   ✓ Caught expected error: {}", e),
        other => println!("   ✗ Unexpected result: {:?}", other),
    }

    println!("\n3. Handling an invalid sampling ratio:");
    let result = Smote::new(1, L2Dist)
        .with_strategy(SamplingStrategy::Ratio(2.0))
        .fit_resample(&data);
    match result {
        Err(SmoteError::InvalidRatio) => println!("   ✓ Caught expected error: {}", SmoteError::InvalidRatio),
        other => println!("   ✗ Unexpected result: {:?}", other),
    }

    println!("\n4. Successful resampling:");
    match Smote::new(2, L2Dist).with_seed(42).fit_resample(&data) {
        Ok(synthetic) => {
            println!("   ✓ {} synthetic samples", synthetic.len());
            for dp in &synthetic {
                println!("     {:?} -> {}", dp.features.to_vec(), dp.label);
            }
        }
        Err(e) => println!("   ✗ Resampling failed: {}", e),
    }

    println!("\n5. Error propagation in functions:");

    fn count_synthetic() -> Result<usize, SmoteError> {
        let data = vec![
            DataPoint::new(array![0.0], 0),
            DataPoint::new(array![1.0], 1),
            DataPoint::new(array![2.0], 1),
        ];
        let synthetic = Smote::new(1, L2Dist).fit_resample(&data)?;
        Ok(synthetic.len())
    }

    match count_synthetic() {
        Ok(n) => println!("   ✗ Unexpectedly produced {} samples", n),
        Err(e) => println!("   ✓ Propagated error: {}", e),
    }
}
