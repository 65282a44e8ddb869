use lumber_ledger::models::*;
use lumber_ledger::store::{RecordStore, ValidationError};
use speculate2::speculate;

fn input(species: &str, count: u32, width: f64, thickness: f64, length: f64) -> NewRecordInput {
    NewRecordInput::new(species, count, width, thickness, length)
}

speculate! {
    before {
        let mut store = RecordStore::new();
    }

    describe "append" {
        it "computes the volume in cubic meters" {
            let record = store.append(input("Çam", 2, 10.0, 5.0, 400.0)).expect("append failed");

            assert_eq!(record.volume_m3, 0.04);
            assert_eq!(format_volume(record.volume_m3), "0.0400");
        }

        it "rounds the stored volume to four decimals" {
            // 3 * 7.3 * 2.2 * 151 / 1e6 = 0.00727518
            let record = store.append(input("Kayın", 3, 7.3, 2.2, 151.0)).expect("append failed");
            assert_eq!(record.volume_m3, 0.0073);
        }

        it "keeps insertion order" {
            store.append(input("Meşe", 1, 10.0, 5.0, 100.0)).expect("append failed");
            store.append(input("Ladin", 1, 10.0, 5.0, 100.0)).expect("append failed");
            store.append(input("Çam", 1, 10.0, 5.0, 100.0)).expect("append failed");

            let species: Vec<&str> = store.list().iter().map(|r| r.species.as_str()).collect();
            assert_eq!(species, vec!["Meşe", "Ladin", "Çam"]);
        }

        it "substitutes a placeholder for a blank species" {
            let record = store.append(input("   ", 1, 10.0, 5.0, 100.0)).expect("append failed");
            assert_eq!(record.species, UNNAMED_SPECIES);
        }

        it "refuses a zero width and leaves the store unchanged" {
            store.append(input("Çam", 1, 10.0, 5.0, 100.0)).expect("append failed");

            let err = store.append(input("Çam", 1, 0.0, 5.0, 100.0)).unwrap_err();

            assert_eq!(err, ValidationError::NonPositiveDimension { field: "width_cm", value: 0.0 });
            assert_eq!(store.len(), 1);
        }

        it "refuses negative thickness and length" {
            assert!(store.append(input("Çam", 1, 10.0, -5.0, 100.0)).is_err());
            assert!(store.append(input("Çam", 1, 10.0, 5.0, -100.0)).is_err());
            assert!(store.is_empty());
        }

        it "refuses dimensions whose volume overflows" {
            let err = store.append(input("Çam", 1, 1e200, 1e200, 1e200)).unwrap_err();

            assert_eq!(err, ValidationError::VolumeOverflow);
            assert!(store.is_empty());
        }

        it "refuses a zero count" {
            let err = store.append(input("Çam", 0, 10.0, 5.0, 100.0)).unwrap_err();
            assert_eq!(err, ValidationError::ZeroCount);
            assert!(store.is_empty());
        }
    }

    describe "clear" {
        it "empties a populated store" {
            for _ in 0..5 {
                store.append(input("Gürgen", 1, 10.0, 5.0, 100.0)).expect("append failed");
            }

            store.clear();

            assert!(store.is_empty());
            assert!(store.summary().is_empty());
        }

        it "is idempotent on an empty store" {
            store.clear();
            store.clear();
            assert_eq!(store.len(), 0);
        }
    }

    describe "summary" {
        it "sums a species across records" {
            store.append(input("Meşe", 1, 10.0, 5.0, 1000.0)).expect("append failed");
            store.append(input("Meşe", 1, 10.0, 3.0, 1000.0)).expect("append failed");

            let summary = store.summary();

            assert_eq!(summary.species.len(), 1);
            assert_eq!(summary.species[0].species, "Meşe");
            assert_eq!(format_volume(summary.species[0].volume_m3), "0.0800");
            assert_eq!(format_volume(summary.grand_total_m3), "0.0800");
        }

        it "has one row per distinct species in ascending order" {
            for species in ["Meşe", "Kavak", "Ladin", "Kavak", "Meşe", "Gürgen"] {
                store.append(input(species, 1, 10.0, 5.0, 100.0)).expect("append failed");
            }

            let summary = store.summary();
            let labels: Vec<&str> = summary.species.iter().map(|s| s.species.as_str()).collect();

            assert_eq!(labels, vec!["Gürgen", "Kavak", "Ladin", "Meşe"]);
        }

        it "agrees with the grand total at four decimals" {
            let sizes = [(3, 7.3, 2.2, 151.0), (1, 12.5, 2.5, 333.0), (7, 4.1, 4.1, 250.0), (2, 10.0, 5.0, 400.0)];
            for (i, (count, w, t, l)) in sizes.into_iter().enumerate() {
                let species = if i % 2 == 0 { "Çam" } else { "Kayın" };
                store.append(input(species, count, w, t, l)).expect("append failed");
            }

            let summary = store.summary();
            assert_eq!(format_volume(summary.aggregate_total()), format_volume(summary.grand_total_m3));
        }
    }
}
