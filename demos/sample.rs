use mapsort::{map_sort, MapSort, MapSortExt};

fn main() {
    // Sorting integers
    let mut data = [-1, 2, 0, -2, 1];
    map_sort(&mut data, None);
    println!("{:?}", data);

    // Sorting strings
    let mut words = vec![
        "hoge".to_string(),
        "piyo".to_string(),
        "fuga".to_string(),
        "foo".to_string(),
        "bar".to_string(),
    ];
    words.map_sort_unstable();
    println!("{:?}", words);

    // The number of workers can be given explicitly, otherwise the size of the current rayon
    // pool is used
    let mut data = [-1, 2, 0, -2, 1];
    data.map_sort_builder().with_workers(4).sort();
    println!("{:?}", data);

    // When sorting more than once, reuse an engine to avoid reallocating its buffers
    let mut engine: MapSort<i32> = MapSort::new();
    engine.init(5, None);

    let mut data = [-1, 2, 0, -2, 1];
    engine.sort(&mut data, None);
    println!("{:?}", data);
}
